use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque token naming an incident.
///
/// Incident identity is owned by the upstream systems; this type only
/// guarantees the token is non-empty and safe to use as a lookup key
/// (no path separators or parent-directory components, so file-backed
/// sources can join it into a path without traversal risk).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IncidentId(String);

#[derive(Debug, Error)]
pub enum InvalidIncidentId {
    #[error("incident id must not be empty")]
    Empty,
    #[error("incident id contains forbidden characters: {0}")]
    ForbiddenCharacters(String),
}

impl IncidentId {
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidIncidentId> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(InvalidIncidentId::Empty);
        }
        if trimmed.contains(['/', '\\']) || trimmed.contains("..") {
            return Err(InvalidIncidentId::ForbiddenCharacters(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for IncidentId {
    type Error = InvalidIncidentId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for IncidentId {
    type Error = InvalidIncidentId;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IncidentId> for String {
    fn from(value: IncidentId) -> Self {
        value.0
    }
}

impl fmt::Display for IncidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
