//! Draft composer backed by an LLM chat-completions API.
//!
//! The orchestrator sees one seam: the [`Composer`] trait, a single blocking
//! call with a bounded timeout. Retry policy and backoff live inside the
//! client ([`retry`]) and are opaque to the pipeline; on timeout the caller
//! gets [`ComposeError::Timeout`], distinct from [`ComposeError::Failed`],
//! so it can decide whether retrying the whole request is worthwhile.

pub mod prompt;
pub mod retry;

mod openai;

pub use openai::OpenAiComposer;

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use herald_types::{ComposeError, ContextBundle, Draft, Tone};

/// Canonical OpenAI chat-completions endpoint.
pub const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Completion cap for a status update (the prompt asks for under 300 words).
pub const MAX_COMPLETION_TOKENS: u32 = 400;

/// Default end-to-end bound on one compose call, retries included.
pub const DEFAULT_COMPOSE_TIMEOUT_SECS: u64 = 30;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// The generation capability: context bundle in, prose draft out.
#[async_trait]
pub trait Composer: Send + Sync {
    async fn compose(&self, bundle: &ContextBundle, tone: Tone) -> Result<Draft, ComposeError>;
}

/// Shared hardened HTTP client: TLS only, no redirects, bounded connect
/// timeout. The bearer API key rides on every request, so plaintext
/// endpoints are refused outright.
pub(crate) fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::none())
            .https_only(true)
            .build()
            .unwrap_or_else(|e| {
                tracing::error!(
                    "Failed to build hardened HTTP client: {e}. Attempting minimal hardened fallback."
                );
                reqwest::Client::builder()
                    .https_only(true)
                    .redirect(reqwest::redirect::Policy::none())
                    .build()
                    .expect("Minimal hardened HTTP client must build; cannot proceed without TLS")
            })
    })
}
