use serde::{Deserialize, Serialize};

/// Voice hint for the composed status update.
///
/// Passed through to the composer unchanged; also selects the sampling
/// temperature so more urgent tones stay closer to the source material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Urgent,
    Reassuring,
    Technical,
}

impl Tone {
    /// Parse a tone hint. Unknown values fall back to `None` so callers can
    /// decide between rejecting and defaulting.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "professional" | "formal" => Some(Self::Professional),
            "casual" => Some(Self::Casual),
            "urgent" => Some(Self::Urgent),
            "reassuring" | "calm" => Some(Self::Reassuring),
            "technical" => Some(Self::Technical),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Casual => "casual",
            Self::Urgent => "urgent",
            Self::Reassuring => "reassuring",
            Self::Technical => "technical",
        }
    }

    /// Style instruction appended to the composer prompt.
    #[must_use]
    pub const fn style(self) -> &'static str {
        match self {
            Self::Professional => "professional and formal",
            Self::Casual => "casual and approachable",
            Self::Urgent => "urgent and direct",
            Self::Reassuring => "calm and reassuring",
            Self::Technical => "technical and detailed",
        }
    }

    /// Sampling temperature for the generation capability.
    #[must_use]
    pub const fn temperature(self) -> f32 {
        match self {
            Self::Professional => 0.3,
            Self::Casual => 0.7,
            Self::Urgent => 0.2,
            Self::Reassuring => 0.5,
            Self::Technical => 0.4,
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
