use thiserror::Error;

use crate::Finding;

/// Sourcing failures. Per-source fetch errors are absorbed into the bundle's
/// fragment status; this error exists only for the hard case where every
/// configured source failed.
#[derive(Debug, Error)]
pub enum SourcingError {
    #[error("all {attempted} configured context sources failed")]
    AllSourcesFailed { attempted: usize },
}

/// Failures of the generation capability.
///
/// `Timeout` is kept distinct from `Failed` so callers can decide whether
/// retrying the whole request is worthwhile.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("composition timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
    #[error("composition failed: {0}")]
    Failed(String),
}

/// Pipeline-level failures surfaced to the caller of `generate`.
///
/// No partial result accompanies any of these; the pipeline aborts before
/// producing a draft.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    SourcingUnavailable(#[from] SourcingError),
    #[error("composition timed out after {timeout_secs}s")]
    CompositionTimeout { timeout_secs: u64 },
    #[error("composition failed: {0}")]
    CompositionFailed(String),
}

impl From<ComposeError> for PipelineError {
    fn from(err: ComposeError) -> Self {
        match err {
            ComposeError::Timeout { timeout_secs } => Self::CompositionTimeout { timeout_secs },
            ComposeError::Failed(detail) => Self::CompositionFailed(detail),
        }
    }
}

/// Failures of the publish path.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("publish blocked: {} finding(s) must be resolved", findings.len())]
    Blocked { findings: Vec<Finding> },
    #[error("status log unavailable: {0}")]
    Store(String),
}
