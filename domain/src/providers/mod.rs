//! Provider identity and configuration (provider-neutral, serde-light).
//!
//! These types describe *which* completion backends exist and how to reach
//! them. The wire formats themselves live with the adapters.

pub mod circuit;

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Every completion backend this system can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    /// Local Ollama daemon over loopback (free, unlimited)
    Ollama,
    /// Together AI chat completions
    Together,
    /// Groq chat completions
    Groq,
    /// Hugging Face Inference API
    HuggingFace,
    /// Cohere generate endpoint
    Cohere,
}

/// Request/response shape a provider speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    /// Flattened prompt to `/api/generate`
    OllamaGenerate,
    /// OpenAI-compatible chat message array
    ChatCompletions,
    /// `inputs` + `parameters`, array of `generated_text`
    HuggingFaceInference,
    /// Flattened prompt, `generations[0].text`
    CohereGenerate,
}

impl ProviderId {
    pub const ALL: [ProviderId; 5] = [
        ProviderId::Ollama,
        ProviderId::Together,
        ProviderId::Groq,
        ProviderId::HuggingFace,
        ProviderId::Cohere,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Ollama => "ollama",
            ProviderId::Together => "together",
            ProviderId::Groq => "groq",
            ProviderId::HuggingFace => "huggingface",
            ProviderId::Cohere => "cohere",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::Ollama => "Ollama (local)",
            ProviderId::Together => "Together AI",
            ProviderId::Groq => "Groq",
            ProviderId::HuggingFace => "Hugging Face Inference",
            ProviderId::Cohere => "Cohere",
        }
    }

    pub fn wire_format(&self) -> WireFormat {
        match self {
            ProviderId::Ollama => WireFormat::OllamaGenerate,
            ProviderId::Together | ProviderId::Groq => WireFormat::ChatCompletions,
            ProviderId::HuggingFace => WireFormat::HuggingFaceInference,
            ProviderId::Cohere => WireFormat::CohereGenerate,
        }
    }

    /// Local backends run on loopback and need no credential
    pub fn is_local(&self) -> bool {
        matches!(self, ProviderId::Ollama)
    }

    /// Environment variable holding the credential, if one is needed
    pub fn default_api_key_env(&self) -> Option<&'static str> {
        match self {
            ProviderId::Ollama => None,
            ProviderId::Together => Some("TOGETHER_API_KEY"),
            ProviderId::Groq => Some("GROQ_API_KEY"),
            ProviderId::HuggingFace => Some("HUGGINGFACE_API_KEY"),
            ProviderId::Cohere => Some("COHERE_API_KEY"),
        }
    }

    /// Default priority: free local backend first, metered cloud after.
    pub fn default_priority() -> Vec<ProviderId> {
        Self::ALL.to_vec()
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "ollama" | "localollama" => Ok(ProviderId::Ollama),
            "together" | "togetherai" => Ok(ProviderId::Together),
            "groq" => Ok(ProviderId::Groq),
            "huggingface" | "hf" => Ok(ProviderId::HuggingFace),
            "cohere" => Ok(ProviderId::Cohere),
            _ => Err(DomainError::UnknownProvider(s.to_string())),
        }
    }
}

/// Connection settings for one provider.
///
/// `active` is decided at start-up (daemon reachable, or credential present)
/// and may be recomputed on demand; it never changes mid-request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub id: ProviderId,
    pub display_name: String,
    pub endpoint: String,
    pub auth_token: Option<String>,
    pub model_id: String,
    pub requests_per_minute_limit: Option<u32>,
    pub timeout: Duration,
    /// Whether calls are charged against the daily quota ledger
    pub metered: bool,
    pub active: bool,
}

impl ProviderConfig {
    /// Built-in endpoint, model, limits and timeout for a provider
    pub fn builtin(id: ProviderId) -> Self {
        let (endpoint, model_id, rpm, timeout_secs) = match id {
            ProviderId::Ollama => ("http://localhost:11434", "gemma:2b", None, 8),
            ProviderId::Together => (
                "https://api.together.xyz/v1/chat/completions",
                "meta-llama/Llama-3.3-70B-Instruct-Turbo",
                Some(60),
                30,
            ),
            ProviderId::Groq => (
                "https://api.groq.com/openai/v1/chat/completions",
                "llama-3.3-70b-versatile",
                Some(30),
                30,
            ),
            ProviderId::HuggingFace => (
                "https://api-inference.huggingface.co/models",
                "mistralai/Mistral-7B-Instruct-v0.3",
                None,
                30,
            ),
            ProviderId::Cohere => ("https://api.cohere.ai/v1/generate", "command", Some(100), 30),
        };
        Self {
            id,
            display_name: id.display_name().to_string(),
            endpoint: endpoint.to_string(),
            auth_token: None,
            model_id: model_id.to_string(),
            requests_per_minute_limit: rpm,
            timeout: Duration::from_secs(timeout_secs),
            metered: !id.is_local(),
            active: false,
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.auth_token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}
