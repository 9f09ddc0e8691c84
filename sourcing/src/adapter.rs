use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use herald_types::{ContextBundle, ContextFragment, IncidentId, SourcingError};

use crate::{ContextSource, DEFAULT_SOURCE_TIMEOUT_SECS};

/// Fans per-source fetches out concurrently and joins them all into one
/// [`ContextBundle`].
///
/// Concurrency is bounded by the number of configured sources, not by a
/// pool. A source exceeding its timeout is recorded as a `!ok` fragment
/// with `error_detail = "timeout"` and never blocks the others.
pub struct SourcingAdapter {
    sources: Vec<Arc<dyn ContextSource>>,
    per_source_timeout: Duration,
}

impl SourcingAdapter {
    #[must_use]
    pub fn new(sources: Vec<Arc<dyn ContextSource>>) -> Self {
        Self {
            sources,
            per_source_timeout: Duration::from_secs(DEFAULT_SOURCE_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, per_source_timeout: Duration) -> Self {
        self.per_source_timeout = per_source_timeout;
        self
    }

    #[must_use]
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Gather context for an incident.
    ///
    /// Errors with [`SourcingError::AllSourcesFailed`] only when every
    /// configured source failed; a mixed bundle is a successful return.
    pub async fn source(&self, incident_id: &IncidentId) -> Result<ContextBundle, SourcingError> {
        let fetches = self.sources.iter().map(|source| {
            let source = Arc::clone(source);
            let incident_id = incident_id.clone();
            let timeout = self.per_source_timeout;
            async move {
                match tokio::time::timeout(timeout, source.fetch(&incident_id)).await {
                    Ok(Ok(content)) => ContextFragment::fetched(source.name(), content),
                    Ok(Err(err)) => {
                        tracing::warn!(
                            source = source.name(),
                            incident = %incident_id,
                            error = %err,
                            "Context source failed"
                        );
                        ContextFragment::failed(source.name(), err.to_string())
                    }
                    Err(_) => {
                        tracing::warn!(
                            source = source.name(),
                            incident = %incident_id,
                            timeout_ms = timeout.as_millis() as u64,
                            "Context source timed out"
                        );
                        ContextFragment::failed(source.name(), "timeout")
                    }
                }
            }
        });

        let bundle = ContextBundle::new(join_all(fetches).await);

        if bundle.all_failed() {
            return Err(SourcingError::AllSourcesFailed {
                attempted: bundle.len(),
            });
        }

        tracing::debug!(
            incident = %incident_id,
            healthy = bundle.healthy_count(),
            total = bundle.len(),
            "Context sourcing complete"
        );
        Ok(bundle)
    }
}
