//! Chat-completions backends (Together, Groq).
//!
//! Both speak the OpenAI-style `/chat/completions` format with bearer
//! auth, so one adapter serves them; the endpoint and model come from
//! the provider config.

use super::http::{self, PathStep};
use async_trait::async_trait;
use consortium_application::{Completion, CompletionProvider, ProviderError};
use consortium_domain::{Message, ProviderConfig, SamplingParams};
use serde_json::{Value, json};

pub struct ChatCompletionsProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl ChatCompletionsProvider {
    pub fn new(config: ProviderConfig) -> Self {
        let client = http::client(config.timeout);
        Self { config, client }
    }

    fn request_body(&self, messages: &[Message], sampling: SamplingParams) -> Value {
        let messages: Vec<Value> = messages
            .iter()
            .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
            .collect();
        json!({
            "model": self.config.model_id,
            "messages": messages,
            "temperature": sampling.temperature,
            "max_tokens": sampling.max_tokens,
        })
    }
}

#[async_trait]
impl CompletionProvider for ChatCompletionsProvider {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn complete(
        &self,
        messages: &[Message],
        sampling: SamplingParams,
    ) -> Result<Completion, ProviderError> {
        let token = self
            .config
            .auth_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ProviderError::NotConfigured(self.config.id.to_string()))?;

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(token)
            .json(&self.request_body(messages, sampling))
            .send()
            .await
            .map_err(http::map_send_error)?;
        let value = http::read_json(response).await?;

        let path = [
            PathStep::Key("choices"),
            PathStep::Index(0),
            PathStep::Key("message"),
            PathStep::Key("content"),
        ];
        let text = http::text_at(&value, &path)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ProviderError::MalformedResponse("missing choices[0].message.content".into())
            })?;

        let mut completion = Completion::new(text);
        if let Some(total) = http::u64_at(&value, &["usage", "total_tokens"]) {
            completion = completion.with_tokens(total);
        }
        Ok(completion)
    }
}
