//! Hugging Face Inference API backend.

use super::http::{self, PathStep};
use super::prompt;
use async_trait::async_trait;
use consortium_application::{Completion, CompletionProvider, ProviderError};
use consortium_domain::{Message, ProviderConfig, SamplingParams};
use serde_json::json;

pub struct HuggingFaceProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl HuggingFaceProvider {
    pub fn new(config: ProviderConfig) -> Self {
        let client = http::client(config.timeout);
        Self { config, client }
    }

    fn url(&self) -> String {
        format!(
            "{}/{}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model_id
        )
    }
}

#[async_trait]
impl CompletionProvider for HuggingFaceProvider {
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
            "inputs": prompt::flatten(messages),
            "parameters": {
                "temperature": sampling.temperature,
                "max_new_tokens": sampling.max_tokens,
                "return_full_text": false,
            },
        });

        let response = self
            .client
            .post(self.url())
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(http::map_send_error)?;
        let value = http::read_json(response).await?;

        // The inference API answers with a list; some deployments return a bare object
        let text = http::text_at(&value, &[PathStep::Index(0), PathStep::Key("generated_text")])
            .or_else(|| http::text_at(&value, &[PathStep::Key("generated_text")]))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ProviderError::MalformedResponse("missing generated_text".into()))?;

        Ok(Completion::new(text))
    }
}
