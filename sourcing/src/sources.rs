use std::path::PathBuf;

use anyhow::Context as _;
use async_trait::async_trait;
use herald_types::IncidentId;

/// One configured operational system the adapter can pull context from.
///
/// Implementations are opaque connectors; the adapter only cares about a
/// name for the fragment label and the fetched raw content.
#[async_trait]
pub trait ContextSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self, incident_id: &IncidentId) -> anyhow::Result<String>;
}

/// File-backed incident source reading `<dir>/<incident_id>.json`.
///
/// When no file exists for the identifier, a built-in default incident
/// payload is returned so demo and test environments work without fixtures.
#[derive(Debug, Clone)]
pub struct FileSource {
    name: String,
    dir: PathBuf,
}

impl FileSource {
    #[must_use]
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
        }
    }

    fn default_payload(incident_id: &IncidentId) -> String {
        serde_json::json!({
            "incident_id": incident_id.as_str(),
            "title": "Service Degradation",
            "impact": "Some users experiencing slow response times",
            "status": "investigating",
            "affected_services": ["API Gateway", "User Authentication"],
            "description": "We are currently investigating reports of slow response times affecting user authentication and API gateway services."
        })
        .to_string()
    }
}

#[async_trait]
impl ContextSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, incident_id: &IncidentId) -> anyhow::Result<String> {
        // IncidentId guarantees no path separators or parent components.
        let path = self.dir.join(format!("{incident_id}.json"));
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    source = %self.name,
                    incident = %incident_id,
                    "No incident file found, using default payload"
                );
                Ok(Self::default_payload(incident_id))
            }
            Err(err) => {
                Err(err).with_context(|| format!("reading incident file {}", path.display()))
            }
        }
    }
}

/// Fixed-payload source for demo wiring and tests.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    payload: String,
}

impl StaticSource {
    #[must_use]
    pub fn new(name: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: payload.into(),
        }
    }
}

#[async_trait]
impl ContextSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, _incident_id: &IncidentId) -> anyhow::Result<String> {
        Ok(self.payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_source_reads_existing_incident_file() {
        let dir = tempfile::tempdir().unwrap();
        let id = IncidentId::new("INC-9").unwrap();
        std::fs::write(dir.path().join("INC-9.json"), r#"{"title":"db outage"}"#).unwrap();

        let source = FileSource::new("tickets", dir.path());
        let content = source.fetch(&id).await.unwrap();
        assert!(content.contains("db outage"));
    }

    #[tokio::test]
    async fn file_source_falls_back_to_default_payload() {
        let dir = tempfile::tempdir().unwrap();
        let id = IncidentId::new("INC-404").unwrap();

        let source = FileSource::new("tickets", dir.path());
        let content = source.fetch(&id).await.unwrap();
        assert!(content.contains("INC-404"));
        assert!(content.contains("Service Degradation"));
    }

    #[tokio::test]
    async fn static_source_returns_payload() {
        let id = IncidentId::new("INC-1").unwrap();
        let source = StaticSource::new("pager", "page fired at 10:30");
        assert_eq!(source.fetch(&id).await.unwrap(), "page fired at 10:30");
        assert_eq!(source.name(), "pager");
    }
}
