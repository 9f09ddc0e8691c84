use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Tone;

/// A composed status update.
///
/// Immutable once produced; operator edits create a new `Draft` value
/// rather than mutating in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    text: String,
    generated_at: DateTime<Utc>,
    tone_used: Tone,
}

impl Draft {
    #[must_use]
    pub fn new(text: impl Into<String>, tone_used: Tone) -> Self {
        Self {
            text: text.into(),
            generated_at: Utc::now(),
            tone_used,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    #[must_use]
    pub const fn tone_used(&self) -> Tone {
        self.tone_used
    }

    /// Produce a new draft carrying edited text, preserving provenance.
    #[must_use]
    pub fn edited(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            generated_at: self.generated_at,
            tone_used: self.tone_used,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edited_draft_is_a_new_value() {
        let original = Draft::new("all systems degraded", Tone::Urgent);
        let revised = original.edited("all systems recovering");
        assert_eq!(original.text(), "all systems degraded");
        assert_eq!(revised.text(), "all systems recovering");
        assert_eq!(revised.tone_used(), Tone::Urgent);
        assert_eq!(revised.generated_at(), original.generated_at());
    }
}
