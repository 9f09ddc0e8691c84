use serde::{Deserialize, Serialize};

/// Pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Sourcing,
    Drafting,
    Gating,
}

impl Stage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sourcing => "sourcing",
            Self::Drafting => "drafting",
            Self::Gating => "gating",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Started,
    Completed,
}

/// Progress marker emitted at real stage boundaries.
///
/// Observability side channel only: the pipeline completes and returns its
/// result whether or not anyone is listening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub stage: Stage,
    pub status: StageStatus,
}

impl ProgressEvent {
    #[must_use]
    pub const fn started(stage: Stage) -> Self {
        Self {
            stage,
            status: StageStatus::Started,
        }
    }

    #[must_use]
    pub const fn completed(stage: Stage) -> Self {
        Self {
            stage,
            status: StageStatus::Completed,
        }
    }
}

impl std::fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self.status {
            StageStatus::Started => "started",
            StageStatus::Completed => "completed",
        };
        write!(f, "{} {}", self.stage.as_str(), status)
    }
}
