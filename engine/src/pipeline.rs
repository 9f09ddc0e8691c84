use std::sync::Arc;
use std::time::Instant;

use herald_providers::Composer;
use herald_sourcing::SourcingAdapter;
use herald_types::{
    IncidentId, PipelineError, PipelineResult, ProgressEvent, Stage, Tone,
};
use tokio::sync::broadcast;

const PROGRESS_CHANNEL_CAPACITY: usize = 32;

/// Sequences sourcing, composition, and gating for one drafting request.
///
/// The stages are strictly linear: composing never begins before sourcing
/// completes, gating never begins before composing completes. Each stage's
/// output is the next stage's required input, so there is nothing to
/// speculate on.
pub struct DraftPipeline {
    sourcing: SourcingAdapter,
    composer: Arc<dyn Composer>,
    gate: crate::GuardrailGate,
    progress: broadcast::Sender<ProgressEvent>,
}

impl DraftPipeline {
    #[must_use]
    pub fn new(
        sourcing: SourcingAdapter,
        composer: Arc<dyn Composer>,
        gate: crate::GuardrailGate,
    ) -> Self {
        let (progress, _) = broadcast::channel(PROGRESS_CHANNEL_CAPACITY);
        Self {
            sourcing,
            composer,
            gate,
            progress,
        }
    }

    /// Subscribe to stage-boundary progress events.
    ///
    /// Observability side channel: the pipeline runs to completion whether
    /// or not anyone is listening.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.progress.subscribe()
    }

    fn emit(&self, event: ProgressEvent) {
        // Send fails when there are no subscribers; that is fine.
        let _ = self.progress.send(event);
        tracing::debug!(progress = %event, "Pipeline progress");
    }

    /// Run the full pipeline for an incident.
    ///
    /// On hard failure no partial result is returned: sourcing failing
    /// entirely aborts before the composer is ever invoked, and composer
    /// timeouts are surfaced distinctly from other composer failures.
    pub async fn generate(
        &self,
        incident_id: &IncidentId,
        tone: Tone,
    ) -> Result<PipelineResult, PipelineError> {
        let started = Instant::now();

        self.emit(ProgressEvent::started(Stage::Sourcing));
        let bundle = self.sourcing.source(incident_id).await?;
        self.emit(ProgressEvent::completed(Stage::Sourcing));

        self.emit(ProgressEvent::started(Stage::Drafting));
        let draft = self.composer.compose(&bundle, tone).await?;
        self.emit(ProgressEvent::completed(Stage::Drafting));

        self.emit(ProgressEvent::started(Stage::Gating));
        let guardrail = self.gate.evaluate(draft.text());
        self.emit(ProgressEvent::completed(Stage::Gating));

        let latency_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            incident = %incident_id,
            tone = %tone,
            verdict = ?guardrail.verdict(),
            findings = guardrail.findings().len(),
            latency_ms,
            "Draft pipeline complete"
        );

        Ok(PipelineResult {
            draft,
            guardrail,
            latency_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GuardrailGate;
    use async_trait::async_trait;
    use herald_sourcing::StaticSource;
    use herald_types::{ComposeError, ContextBundle, Draft, StageStatus, Verdict};

    struct FixedComposer(&'static str);

    #[async_trait]
    impl Composer for FixedComposer {
        async fn compose(&self, _bundle: &ContextBundle, tone: Tone) -> Result<Draft, ComposeError> {
            Ok(Draft::new(self.0, tone))
        }
    }

    struct BrokenComposer;

    #[async_trait]
    impl Composer for BrokenComposer {
        async fn compose(
            &self,
            _bundle: &ContextBundle,
            _tone: Tone,
        ) -> Result<Draft, ComposeError> {
            Err(ComposeError::Timeout { timeout_secs: 30 })
        }
    }

    fn pipeline(composer: Arc<dyn Composer>) -> DraftPipeline {
        let sourcing = SourcingAdapter::new(vec![Arc::new(StaticSource::new(
            "tickets",
            "auth latency elevated",
        ))]);
        DraftPipeline::new(sourcing, composer, GuardrailGate::default())
    }

    fn incident() -> IncidentId {
        IncidentId::new("INC-123").unwrap()
    }

    #[tokio::test]
    async fn clean_draft_passes_the_gate() {
        let pipeline = pipeline(Arc::new(FixedComposer("We are investigating.")));
        let result = pipeline
            .generate(&incident(), Tone::Professional)
            .await
            .unwrap();
        assert_eq!(result.guardrail.verdict(), Verdict::Pass);
        assert_eq!(result.draft.text(), "We are investigating.");
    }

    #[tokio::test]
    async fn leaking_draft_is_blocked_with_latency_recorded() {
        let pipeline = pipeline(Arc::new(FixedComposer(
            "Contact oncall@example.com for updates.",
        )));
        let result = pipeline
            .generate(&incident(), Tone::Professional)
            .await
            .unwrap();
        assert_eq!(result.guardrail.verdict(), Verdict::Block);
        assert!(!result.guardrail.findings().is_empty());
        assert!(result.guardrail.rendered_text().contains("<REDACTED_EMAIL>"));
    }

    #[tokio::test]
    async fn sourcing_failure_aborts_before_composer() {
        struct UnreachableComposer;

        #[async_trait]
        impl Composer for UnreachableComposer {
            async fn compose(
                &self,
                _bundle: &ContextBundle,
                _tone: Tone,
            ) -> Result<Draft, ComposeError> {
                panic!("composer must not run when sourcing hard-fails");
            }
        }

        let sourcing = SourcingAdapter::new(Vec::new());
        let pipeline =
            DraftPipeline::new(sourcing, Arc::new(UnreachableComposer), GuardrailGate::default());

        let err = pipeline
            .generate(&incident(), Tone::Professional)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::SourcingUnavailable(_)));
    }

    #[tokio::test]
    async fn composer_timeout_surfaces_distinctly() {
        let pipeline = pipeline(Arc::new(BrokenComposer));
        let err = pipeline
            .generate(&incident(), Tone::Professional)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::CompositionTimeout { .. }));
    }

    #[tokio::test]
    async fn progress_events_fire_in_stage_order() {
        let pipeline = pipeline(Arc::new(FixedComposer("All clear.")));
        let mut rx = pipeline.subscribe();

        pipeline
            .generate(&incident(), Tone::Professional)
            .await
            .unwrap();

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert_eq!(
            events,
            vec![
                ProgressEvent::started(Stage::Sourcing),
                ProgressEvent::completed(Stage::Sourcing),
                ProgressEvent::started(Stage::Drafting),
                ProgressEvent::completed(Stage::Drafting),
                ProgressEvent::started(Stage::Gating),
                ProgressEvent::completed(Stage::Gating),
            ]
        );
        assert!(events
            .iter()
            .all(|e| matches!(e.status, StageStatus::Started | StageStatus::Completed)));
    }

    #[tokio::test]
    async fn pipeline_completes_with_no_subscribers() {
        let pipeline = pipeline(Arc::new(FixedComposer("No listeners here.")));
        let result = pipeline
            .generate(&incident(), Tone::Casual)
            .await
            .unwrap();
        assert_eq!(result.draft.text(), "No listeners here.");
    }
}
