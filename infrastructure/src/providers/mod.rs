//! HTTP adapters implementing the `CompletionProvider` port.
//!
//! One adapter per wire format. Which adapter serves a provider is decided
//! by `ProviderId::wire_format`, so Together and Groq share an implementation.

pub mod cohere;
mod http;
pub mod huggingface;
pub mod ollama;
pub mod openai_compat;
mod prompt;

pub use cohere::CohereProvider;
pub use huggingface::HuggingFaceProvider;
pub use ollama::OllamaProvider;
pub use openai_compat::ChatCompletionsProvider;

use consortium_application::CompletionProvider;
use consortium_domain::{ProviderConfig, WireFormat};
use std::sync::Arc;
use tracing::{debug, warn};

/// Build the adapter matching a provider's wire format.
///
/// The initial `active` flag is the cheap local estimate: local backends
/// start active, remote ones only with a credential. Call
/// `ProviderDispatcher::refresh_liveness` to replace it with a real probe.
pub fn build_provider(mut config: ProviderConfig) -> Arc<dyn CompletionProvider> {
    config.active = config.id.is_local() || config.has_credential();
    if !config.active {
        warn!(
            provider = %config.id,
            "No API key configured, provider stays inactive"
        );
    } else {
        debug!(provider = %config.id, model = %config.model_id, "Provider configured");
    }

    match config.id.wire_format() {
        WireFormat::OllamaGenerate => Arc::new(OllamaProvider::new(config)),
        WireFormat::ChatCompletions => Arc::new(ChatCompletionsProvider::new(config)),
        WireFormat::HuggingFaceInference => Arc::new(HuggingFaceProvider::new(config)),
        WireFormat::CohereGenerate => Arc::new(CohereProvider::new(config)),
    }
}

/// Build adapters in the given priority order.
pub fn build_providers(
    configs: impl IntoIterator<Item = ProviderConfig>,
) -> Vec<Arc<dyn CompletionProvider>> {
    configs.into_iter().map(build_provider).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use consortium_domain::ProviderId;

    #[test]
    fn test_build_providers_keeps_order_and_marks_liveness() {
        let providers = build_providers(vec![
            ProviderConfig::builtin(ProviderId::Ollama),
            ProviderConfig::builtin(ProviderId::Groq).with_auth_token("gsk"),
            ProviderConfig::builtin(ProviderId::Cohere),
        ]);

        let ids: Vec<_> = providers.iter().map(|p| p.config().id).collect();
        assert_eq!(
            ids,
            vec![ProviderId::Ollama, ProviderId::Groq, ProviderId::Cohere]
        );
        let active: Vec<_> = providers.iter().map(|p| p.config().active).collect();
        assert_eq!(active, vec![true, true, false]);
    }

    #[tokio::test]
    async fn test_remote_probe_follows_credential() {
        let with_key = build_provider(
            ProviderConfig::builtin(ProviderId::Together).with_auth_token("tg"),
        );
        let without_key = build_provider(ProviderConfig::builtin(ProviderId::HuggingFace));
        assert!(with_key.probe().await);
        assert!(!without_key.probe().await);
    }
}
