//! Local Ollama backend (`/api/generate`, non-streaming).

use super::http::{self, PathStep};
use super::prompt;
use async_trait::async_trait;
use consortium_application::{Completion, CompletionProvider, ProviderError};
use consortium_domain::{Message, ProviderConfig, SamplingParams};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Upper bound for the reachability probe
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

pub struct OllamaProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(config: ProviderConfig) -> Self {
        let client = http::client(config.timeout);
        Self { config, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl CompletionProvider for OllamaProvider {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn complete(
        &self,
        messages: &[Message],
        sampling: SamplingParams,
    ) -> Result<Completion, ProviderError> {
        let body = json!({
            "model": self.config.model_id,
            "prompt": prompt::flatten(messages),
            "stream": false,
            "options": {
                "temperature": sampling.temperature,
                "num_predict": sampling.max_tokens,
            },
        });

        let response = self
            .client
            .post(self.url("/api/generate"))
            .json(&body)
            .send()
            .await
            .map_err(http::map_send_error)?;
        let value = http::read_json(response).await?;

        let text = http::text_at(&value, &[PathStep::Key("response")])
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ProviderError::MalformedResponse("missing `response` text".into()))?;

        let mut completion = Completion::new(text);
        let prompt_tokens = http::u64_at(&value, &["prompt_eval_count"]);
        let output_tokens = http::u64_at(&value, &["eval_count"]);
        if prompt_tokens.is_some() || output_tokens.is_some() {
            completion = completion
                .with_tokens(prompt_tokens.unwrap_or(0) + output_tokens.unwrap_or(0));
        }
        Ok(completion)
    }

    async fn probe(&self) -> bool {
        let result = self
            .client
            .get(self.url("/api/tags"))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await;
        match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Ollama not reachable");
                false
            }
        }
    }
}
