use serde::{Deserialize, Serialize};

use crate::{Draft, GuardrailResult};

/// Structured result of one drafting request.
///
/// `latency_ms` measures wall clock from sourcing start to gate completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub draft: Draft,
    pub guardrail: GuardrailResult,
    pub latency_ms: u64,
}
