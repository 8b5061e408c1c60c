//! Provider configuration from TOML (`[providers.<id>]` tables)
//!
//! Every field is an override of the built-in provider defaults. Credentials
//! are read from the environment variable named by `api_key_env`; an inline
//! `api_key` wins when set but is not recommended.

use consortium_domain::{ConfigIssue, ConfigIssueCode, ProviderConfig, ProviderId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// ```toml
/// [providers.groq]
/// api_key_env = "GROQ_API_KEY"
/// model = "llama-3.3-70b-versatile"
/// requests_per_minute = 30
/// timeout_seconds = 30
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    pub endpoint: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended, use an env var instead)
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub requests_per_minute: Option<u32>,
    pub timeout_seconds: Option<u64>,
    /// Whether calls count against the daily token budget
    pub metered: Option<bool>,
    /// `false` removes the provider from the priority list
    pub enabled: bool,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key_env: None,
            api_key: None,
            model: None,
            requests_per_minute: None,
            timeout_seconds: None,
            metered: None,
            enabled: true,
        }
    }
}

impl FileProviderConfig {
    /// Apply overrides to the built-in config for `id`.
    ///
    /// `env` looks up environment variables; it is a parameter so tests do
    /// not depend on the process environment.
    pub fn to_provider_config(
        &self,
        id: ProviderId,
        env: impl Fn(&str) -> Option<String>,
    ) -> (ProviderConfig, Vec<ConfigIssue>) {
        let mut config = ProviderConfig::builtin(id);
        let mut issues = Vec::new();

        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(model) = &self.model {
            config.model_id = model.clone();
        }
        if let Some(rpm) = self.requests_per_minute {
            config.requests_per_minute_limit = (rpm > 0).then_some(rpm);
        }
        if let Some(secs) = self.timeout_seconds.filter(|s| *s > 0) {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(metered) = self.metered {
            config.metered = metered;
        }

        let inline = self.api_key.clone().filter(|k| !k.trim().is_empty());
        let env_name = self
            .api_key_env
            .as_deref()
            .or_else(|| id.default_api_key_env());
        config.auth_token = inline.or_else(|| {
            env_name
                .and_then(&env)
                .filter(|k| !k.trim().is_empty())
        });

        if !id.is_local() && config.auth_token.is_none() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingCredential,
                format!(
                    "providers.{}: no API key found{}; provider will be inactive",
                    id,
                    env_name
                        .map(|name| format!(" in ${}", name))
                        .unwrap_or_default()
                ),
            ));
        }
        (config, issues)
    }
}
