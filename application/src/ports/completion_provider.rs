//! Completion provider port
//!
//! One implementation per concrete backend. Adapters translate a generic
//! message list into the backend's wire format and back; they never retry.
//! Retry, fallback and circuit breaking belong to the dispatcher.

use async_trait::async_trait;
use consortium_domain::{Message, ProviderConfig, SamplingParams};
use thiserror::Error;

/// Errors a single completion attempt can produce
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The backend refused the call for quota reasons (HTTP 429).
    /// `used`/`limit` are filled when the response body reports them.
    #[error("Rate limited by provider (used: {used:?}, limit: {limit:?})")]
    RateLimited {
        used: Option<u64>,
        limit: Option<u64>,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl ProviderError {
    /// Only timeouts advance the circuit breaker
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Timeout)
    }
}

/// A successful completion
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    /// Backend-reported token usage, when the response carries it
    pub tokens_used: Option<u64>,
}

impl Completion {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tokens_used: None,
        }
    }

    pub fn with_tokens(mut self, tokens: u64) -> Self {
        self.tokens_used = Some(tokens);
        self
    }
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Static connection settings for this backend
    fn config(&self) -> &ProviderConfig;

    /// Issue one completion request
    async fn complete(
        &self,
        messages: &[Message],
        sampling: SamplingParams,
    ) -> Result<Completion, ProviderError>;

    /// Liveness check used to compute `active`.
    ///
    /// The default treats a configured credential as "live"; local
    /// backends override this with a reachability probe.
    async fn probe(&self) -> bool {
        let config = self.config();
        config.id.is_local() || config.has_credential()
    }
}
