//! Advisor: a role bound to its spec, delegating completions to a gateway.

use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use consortium_domain::{AdvisorId, AdvisorSpec, Message};
use std::sync::Arc;

pub struct Advisor<G: LlmGateway + ?Sized> {
    spec: AdvisorSpec,
    gateway: Arc<G>,
}

impl<G: LlmGateway + ?Sized> Advisor<G> {
    pub fn new(spec: AdvisorSpec, gateway: Arc<G>) -> Self {
        Self { spec, gateway }
    }

    pub fn id(&self) -> AdvisorId {
        self.spec.id
    }

    pub fn label(&self) -> &'static str {
        self.spec.label()
    }

    pub fn spec(&self) -> &AdvisorSpec {
        &self.spec
    }

    /// `[system(preamble)] + api_history + [user(context_text)]`
    pub fn build_messages(&self, context_text: &str, api_history: &[Message]) -> Vec<Message> {
        let mut messages = Vec::with_capacity(api_history.len() + 2);
        messages.push(Message::system(self.spec.instruction_preamble.clone()));
        messages.extend(api_history.iter().map(Message::stripped));
        messages.push(Message::user(context_text));
        messages
    }

    pub async fn respond(&self, context_text: &str, api_history: &[Message]) -> String {
        let request = CompletionRequest::new(
            self.build_messages(context_text, api_history),
            self.spec.id,
            self.spec.sampling(),
        );
        self.gateway.complete(request).await
    }
}
