use std::path::PathBuf;
use std::{env, fs};

use serde::Deserialize;

const DEFAULT_BIND: &str = "127.0.0.1:8787";
const DEFAULT_INCIDENT_DIR: &str = "data/incidents";
const DEFAULT_STATUS_LOG: &str = "data/status_data.json";

#[derive(Debug, Default, Deserialize)]
pub struct HeraldConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub composer: ComposerConfig,
    #[serde(default)]
    pub sourcing: SourcingConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// JSON file the status log is mirrored to.
    #[serde(default = "default_status_log")]
    pub status_log: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            status_log: default_status_log(),
        }
    }
}

#[derive(Default, Deserialize)]
pub struct ComposerConfig {
    /// Prefer the OPENAI_API_KEY environment variable over this field.
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

// Manual Debug impl to prevent leaking the API key in logs.
impl std::fmt::Debug for ComposerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposerConfig")
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    "[REDACTED]"
                } else {
                    "None"
                },
            )
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ComposerConfig {
    /// Resolve the API key: environment first, then config file.
    #[must_use]
    pub fn resolve_api_key(&self) -> Option<String> {
        env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct SourcingConfig {
    /// Per-source fetch timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
}

impl Default for SourcingConfig {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            sources: default_sources(),
        }
    }
}

/// One configured context source.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    File { name: String, dir: PathBuf },
    Static { name: String, payload: String },
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_status_log() -> PathBuf {
    PathBuf::from(DEFAULT_STATUS_LOG)
}

fn default_sources() -> Vec<SourceConfig> {
    vec![SourceConfig::File {
        name: "incident-data".to_string(),
        dir: PathBuf::from(DEFAULT_INCIDENT_DIR),
    }]
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse config {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl HeraldConfig {
    /// Load configuration.
    ///
    /// `HERALD_CONFIG` names an explicit file (an error if unreadable);
    /// otherwise `herald.toml` is used when present, and built-in defaults
    /// apply when it is not. `HERALD_BIND` overrides the bind address.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var("HERALD_CONFIG") {
            Ok(path) => Self::from_file(PathBuf::from(path))?,
            Err(_) => {
                let default_path = PathBuf::from("herald.toml");
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        if let Ok(bind) = env::var("HERALD_BIND")
            && !bind.trim().is_empty()
        {
            config.server.bind = bind;
        }
        Ok(config)
    }

    pub fn from_file(path: PathBuf) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_all_sections() {
        let config: HeraldConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.bind, DEFAULT_BIND);
        assert_eq!(config.sourcing.sources.len(), 1);
    }

    #[test]
    fn parses_full_config() {
        let raw = r#"
            [server]
            bind = "0.0.0.0:9000"
            status_log = "/var/lib/herald/status.json"

            [composer]
            model = "gpt-4o-mini"
            timeout_secs = 20

            [sourcing]
            timeout_ms = 2500

            [[sourcing.sources]]
            kind = "file"
            name = "tickets"
            dir = "/srv/incidents"

            [[sourcing.sources]]
            kind = "static"
            name = "banner"
            payload = "maintenance window active"
        "#;
        let config: HeraldConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.composer.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(config.sourcing.timeout_ms, Some(2500));
        assert_eq!(config.sourcing.sources.len(), 2);
        assert!(matches!(
            config.sourcing.sources[1],
            SourceConfig::Static { .. }
        ));
    }

    #[test]
    fn composer_debug_masks_api_key() {
        let config = ComposerConfig {
            api_key: Some("sk-very-secret".to_string()),
            model: None,
            timeout_secs: None,
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-very-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
