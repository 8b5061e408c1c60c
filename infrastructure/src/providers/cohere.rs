//! Cohere `/v1/generate` backend.

use super::http::{self, PathStep};
use super::prompt;
use async_trait::async_trait;
use consortium_application::{Completion, CompletionProvider, ProviderError};
use consortium_domain::{Message, ProviderConfig, SamplingParams};
use serde_json::json;

pub struct CohereProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl CohereProvider {
    pub fn new(config: ProviderConfig) -> Self {
        let client = http::client(config.timeout);
        Self { config, client }
    }
}

#[async_trait]
impl CompletionProvider for CohereProvider {
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

        let body = json!({
            "model": self.config.model_id,
            "prompt": prompt::flatten(messages),
            "temperature": sampling.temperature,
            "max_tokens": sampling.max_tokens,
        });

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(http::map_send_error)?;
        let value = http::read_json(response).await?;

        let path = [
            PathStep::Key("generations"),
            PathStep::Index(0),
            PathStep::Key("text"),
        ];
        let text = http::text_at(&value, &path)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ProviderError::MalformedResponse("missing generations[0].text".into()))?;

        let mut completion = Completion::new(text);
        let input = http::u64_at(&value, &["meta", "billed_units", "input_tokens"]);
        let output = http::u64_at(&value, &["meta", "billed_units", "output_tokens"]);
        if input.is_some() || output.is_some() {
            completion = completion.with_tokens(input.unwrap_or(0) + output.unwrap_or(0));
        }
        Ok(completion)
    }
}
