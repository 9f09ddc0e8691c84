use std::time::Duration;

use async_trait::async_trait;
use herald_types::{ComposeError, ContextBundle, Draft, Tone};
use serde::Deserialize;
use serde_json::json;

use crate::retry::{RetryConfig, RetryOutcome, send_with_retry};
use crate::{
    Composer, DEFAULT_COMPOSE_TIMEOUT_SECS, DEFAULT_MODEL, MAX_COMPLETION_TOKENS,
    OPENAI_CHAT_COMPLETIONS_URL, http_client, prompt,
};

const MAX_ERROR_BODY_BYTES: usize = 512;

/// Composer backed by the OpenAI chat-completions API.
///
/// One logical call per request: internal retries and backoff are bounded
/// by the overall timeout, after which the caller sees
/// [`ComposeError::Timeout`].
pub struct OpenAiComposer {
    api_key: String,
    model: String,
    endpoint: String,
    timeout: Duration,
    retry: RetryConfig,
    client: Option<reqwest::Client>,
}

// Manual Debug impl to keep the API key out of logs.
impl std::fmt::Debug for OpenAiComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiComposer")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl OpenAiComposer {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: OPENAI_CHAT_COMPLETIONS_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_COMPOSE_TIMEOUT_SECS),
            retry: RetryConfig::default(),
            client: None,
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the client at a different endpoint (tests, proxies).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Substitute the shared hardened client. The default refuses plaintext
    /// endpoints; injecting a client is the explicit opt-out for in-process
    /// test servers and trusted local proxies.
    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    fn client(&self) -> &reqwest::Client {
        match &self.client {
            Some(client) => client,
            None => http_client(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

async fn error_detail(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let mut snippet: String = body.chars().take(MAX_ERROR_BODY_BYTES).collect();
    if snippet.is_empty() {
        snippet = "<empty body>".to_string();
    }
    format!("upstream returned {status}: {snippet}")
}

#[async_trait]
impl Composer for OpenAiComposer {
    async fn compose(&self, bundle: &ContextBundle, tone: Tone) -> Result<Draft, ComposeError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": prompt::SYSTEM_PROMPT },
                { "role": "user", "content": prompt::build_prompt(bundle, tone) },
            ],
            "max_tokens": MAX_COMPLETION_TOKENS,
            "temperature": tone.temperature(),
        });

        let timeout_secs = self.timeout.as_secs();
        let send = send_with_retry(
            || {
                self.client()
                    .post(&self.endpoint)
                    .bearer_auth(&self.api_key)
                    .json(&body)
            },
            &self.retry,
        );

        let outcome = tokio::time::timeout(self.timeout, send)
            .await
            .map_err(|_| ComposeError::Timeout { timeout_secs })?;

        let response = match outcome {
            RetryOutcome::Success(response) => response,
            RetryOutcome::HttpError(response) => {
                return Err(ComposeError::Failed(error_detail(response).await));
            }
            RetryOutcome::ConnectionError { attempts, source } => {
                return Err(ComposeError::Failed(format!(
                    "unreachable after {attempts} attempts: {source}"
                )));
            }
        };

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ComposeError::Failed(format!("malformed completion response: {e}")))?;

        let text = completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(str::trim)
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ComposeError::Failed("empty completion".to_string()));
        }

        tracing::debug!(
            model = %self.model,
            tone = %tone,
            chars = text.len(),
            "Draft composed"
        );
        Ok(Draft::new(text, tone))
    }
}
