//! Dispatch configuration from TOML (`[dispatch]` section)

use consortium_application::DispatchSettings;
use consortium_domain::{ConfigIssue, ConfigIssueCode, DEFAULT_CIRCUIT_THRESHOLD, ProviderId};
use serde::{Deserialize, Serialize};

/// ```toml
/// [dispatch]
/// offline = false
/// circuit_threshold = 3
/// priority = ["ollama", "together", "groq", "huggingface", "cohere"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDispatchConfig {
    /// Answer every request from the offline fallback
    pub offline: bool,
    pub circuit_threshold: u32,
    /// Provider ids, highest priority first
    pub priority: Vec<String>,
}

impl Default for FileDispatchConfig {
    fn default() -> Self {
        Self {
            offline: false,
            circuit_threshold: DEFAULT_CIRCUIT_THRESHOLD,
            priority: ProviderId::default_priority()
                .iter()
                .map(|id| id.as_str().to_string())
                .collect(),
        }
    }
}

impl FileDispatchConfig {
    pub fn to_settings(&self) -> (DispatchSettings, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        if self.circuit_threshold == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroCircuitThreshold,
                "dispatch.circuit_threshold cannot be 0",
            ));
        }
        let settings = DispatchSettings {
            offline: self.offline,
            ..DispatchSettings::default()
        }
        .with_circuit_threshold(self.circuit_threshold);
        (settings, issues)
    }

    /// Priority list parsed into ids; duplicates keep their first position.
    pub fn parse_priority(&self) -> (Vec<ProviderId>, Vec<ConfigIssue>) {
        let mut ids = Vec::new();
        let mut issues = Vec::new();

        for name in &self.priority {
            match name.parse::<ProviderId>() {
                Ok(id) if !ids.contains(&id) => ids.push(id),
                Ok(_) => {}
                Err(_) => issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnknownProvider,
                    format!("dispatch.priority: unknown provider '{}'", name),
                )),
            }
        }
        if self.priority.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyPriority,
                "dispatch.priority cannot be empty",
            ));
        }
        (ids, issues)
    }
}
