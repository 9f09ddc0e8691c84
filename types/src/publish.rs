use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An entry in the public status feed.
///
/// Created only by the publish controller on a PASS verdict. The feed is
/// append-only; entries are never mutated or deleted by this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedUpdate {
    pub ts: DateTime<Utc>,
    pub text: String,
}

impl PublishedUpdate {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            ts: Utc::now(),
            text: text.into(),
        }
    }
}
