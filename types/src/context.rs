use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One piece of raw context fetched from a configured operational system.
///
/// A fragment is kept even when the fetch failed, so a partially degraded
/// sourcing pass still yields a complete picture of what was attempted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextFragment {
    pub source_name: String,
    pub content: String,
    pub fetched_at: DateTime<Utc>,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl ContextFragment {
    #[must_use]
    pub fn fetched(source_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            content: content.into(),
            fetched_at: Utc::now(),
            ok: true,
            error_detail: None,
        }
    }

    #[must_use]
    pub fn failed(source_name: impl Into<String>, error_detail: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            content: String::new(),
            fetched_at: Utc::now(),
            ok: false,
            error_detail: Some(error_detail.into()),
        }
    }
}

/// Ordered collection of context fragments for one drafting request.
///
/// Partial-failure tolerant: a bundle with some `!ok` fragments is still
/// valid input to composition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextBundle {
    fragments: Vec<ContextFragment>,
}

impl ContextBundle {
    #[must_use]
    pub fn new(fragments: Vec<ContextFragment>) -> Self {
        Self { fragments }
    }

    #[must_use]
    pub fn fragments(&self) -> &[ContextFragment] {
        &self.fragments
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    #[must_use]
    pub fn healthy_count(&self) -> usize {
        self.fragments.iter().filter(|f| f.ok).count()
    }

    /// True when every configured source failed (or nothing was configured).
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.fragments.iter().all(|f| !f.ok)
    }

    /// Concatenate the content of healthy fragments, labelled per source,
    /// for interpolation into the composer prompt.
    #[must_use]
    pub fn combined_content(&self) -> String {
        let mut out = String::new();
        for fragment in self.fragments.iter().filter(|f| f.ok) {
            if !out.is_empty() {
                out.push_str("\n\n");
            }
            out.push_str("### ");
            out.push_str(&fragment.source_name);
            out.push('\n');
            out.push_str(&fragment.content);
        }
        out
    }
}
