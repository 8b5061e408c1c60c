//! LLM Gateway port
//!
//! The single seam between advisors and whatever produces completions.
//! Unlike [`CompletionProvider`](super::completion_provider::CompletionProvider),
//! a gateway is infallible: it always returns text, degrading to offline
//! output when nothing else is available.

use async_trait::async_trait;
use consortium_domain::{AdvisorId, Message, SamplingParams};

/// One advisor turn worth of completion input
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    /// Advisor on whose behalf the completion is requested
    pub advisor: AdvisorId,
    pub sampling: SamplingParams,
}

impl CompletionRequest {
    pub fn new(messages: Vec<Message>, advisor: AdvisorId, sampling: SamplingParams) -> Self {
        Self {
            messages,
            advisor,
            sampling,
        }
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer obtains completions.
/// The production implementation is the provider dispatcher; tests use
/// scripted stubs.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Obtain a completion. Never fails.
    async fn complete(&self, request: CompletionRequest) -> String;
}
