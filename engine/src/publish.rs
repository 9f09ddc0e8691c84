use std::sync::Arc;

use herald_types::{GuardrailResult, PublishError, PublishedUpdate};

use crate::{GuardrailGate, StatusLog};

/// Controls what reaches the public status feed.
///
/// `publish` re-runs the gate unconditionally: client-supplied validation
/// state is never trusted as authorization to skip it, so a stale or
/// bypassed client check cannot push a leak through.
pub struct PublishController {
    gate: GuardrailGate,
    log: Arc<dyn StatusLog>,
}

impl PublishController {
    #[must_use]
    pub fn new(gate: GuardrailGate, log: Arc<dyn StatusLog>) -> Self {
        Self { gate, log }
    }

    /// Re-validation entry point used while the operator edits.
    /// Never appends anything.
    #[must_use]
    pub fn validate(&self, text: &str) -> GuardrailResult {
        self.gate.evaluate(text)
    }

    /// Publish a final draft. Appends exactly one entry on PASS; refuses
    /// with the blocking findings otherwise.
    pub async fn publish(&self, text: &str) -> Result<PublishedUpdate, PublishError> {
        let result = self.gate.evaluate(text);
        if !result.is_pass() {
            tracing::warn!(
                findings = result.findings().len(),
                "Publish blocked by guardrail"
            );
            return Err(PublishError::Blocked {
                findings: result.into_findings(),
            });
        }

        let update = PublishedUpdate::new(text);
        self.log.append(update.clone()).await?;
        tracing::info!(ts = %update.ts, chars = text.len(), "Status update published");
        Ok(update)
    }

    /// Published updates, newest first.
    pub async fn updates(&self) -> Result<Vec<PublishedUpdate>, PublishError> {
        self.log.read().await
    }
}
