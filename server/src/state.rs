use std::sync::Arc;
use std::time::Duration;

use herald_engine::{
    DebouncedValidator, DraftPipeline, FileStatusLog, GuardrailGate, PublishController,
};
use herald_providers::OpenAiComposer;
use herald_sourcing::{ContextSource, FileSource, SourcingAdapter, StaticSource};

use crate::config::{HeraldConfig, SourceConfig};

/// Shared application state behind the router.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<DraftPipeline>,
    pub publisher: Arc<PublishController>,
    pub validator: Arc<DebouncedValidator>,
}

impl AppState {
    #[must_use]
    pub fn new(
        pipeline: Arc<DraftPipeline>,
        publisher: Arc<PublishController>,
        validator: Arc<DebouncedValidator>,
    ) -> Self {
        Self {
            pipeline,
            publisher,
            validator,
        }
    }

    /// Assemble production state from configuration.
    pub async fn from_config(config: &HeraldConfig) -> anyhow::Result<Self> {
        let api_key = config
            .composer
            .resolve_api_key()
            .ok_or_else(|| anyhow::anyhow!("no API key: set OPENAI_API_KEY or [composer].api_key"))?;

        let mut composer = OpenAiComposer::new(api_key);
        if let Some(model) = &config.composer.model {
            composer = composer.with_model(model);
        }
        if let Some(timeout_secs) = config.composer.timeout_secs {
            composer = composer.with_timeout(Duration::from_secs(timeout_secs));
        }

        let sources: Vec<Arc<dyn ContextSource>> = config
            .sourcing
            .sources
            .iter()
            .map(|source| match source {
                SourceConfig::File { name, dir } => {
                    Arc::new(FileSource::new(name, dir)) as Arc<dyn ContextSource>
                }
                SourceConfig::Static { name, payload } => {
                    Arc::new(StaticSource::new(name, payload)) as Arc<dyn ContextSource>
                }
            })
            .collect();
        let mut sourcing = SourcingAdapter::new(sources);
        if let Some(timeout_ms) = config.sourcing.timeout_ms {
            sourcing = sourcing.with_timeout(Duration::from_millis(timeout_ms));
        }

        let gate = GuardrailGate::default();
        let log = Arc::new(FileStatusLog::open(&config.server.status_log).await?);

        Ok(Self::new(
            Arc::new(DraftPipeline::new(sourcing, Arc::new(composer), gate.clone())),
            Arc::new(PublishController::new(gate.clone(), log)),
            Arc::new(DebouncedValidator::new(gate)),
        ))
    }
}
