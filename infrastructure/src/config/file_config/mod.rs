//! Raw TOML configuration data types
//!
//! These structs mirror the config file exactly. They are deserialized as-is
//! and converted once into the runtime types the application consumes.

mod advisors;
mod conversation;
mod dispatch;
mod logging;
mod output;
mod providers;
mod quota;

pub use advisors::FileAdvisorConfig;
pub use conversation::FileConversationConfig;
pub use dispatch::FileDispatchConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use providers::FileProviderConfig;
pub use quota::FileQuotaConfig;

use super::resolved::ResolvedConfig;
use consortium_domain::{
    AdvisorId, AdvisorRoster, AdvisorSelection, ConfigIssue, ConfigIssueCode, ProviderId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Start-up aborts on any error-severity issue
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("invalid configuration ({} error(s)): {}", .0.len(), summarize(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn summarize(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Expand a leading `~/` to the home directory
pub(crate) fn expand_home(raw: &str) -> Option<PathBuf> {
    match raw.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None => Some(PathBuf::from(raw)),
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub conversation: FileConversationConfig,
    pub quota: FileQuotaConfig,
    pub dispatch: FileDispatchConfig,
    /// Keyed by provider id (`ollama`, `together`, `groq`, `huggingface`, `cohere`)
    pub providers: BTreeMap<String, FileProviderConfig>,
    /// Keyed by advisor id (`product_manager`, `security_expert`, ...)
    pub advisors: BTreeMap<String, FileAdvisorConfig>,
    pub output: FileOutputConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the static configuration, returning all detected issues.
    ///
    /// Credentials are not checked here since they come from the
    /// environment; [`FileConfig::resolve`] reports those.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let (_, issues) = self.collect(|_| None);
        issues
            .into_iter()
            .filter(|i| i.code != ConfigIssueCode::MissingCredential)
            .collect()
    }

    /// Convert into runtime types using the process environment.
    ///
    /// Returns the warnings alongside the result; any error aborts.
    pub fn resolve(&self) -> Result<(ResolvedConfig, Vec<ConfigIssue>), ConfigValidationError> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    pub fn resolve_with(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<(ResolvedConfig, Vec<ConfigIssue>), ConfigValidationError> {
        let (resolved, issues) = self.collect(env);
        let (errors, warnings): (Vec<_>, Vec<_>) =
            issues.into_iter().partition(ConfigIssue::is_error);
        if !errors.is_empty() {
            return Err(ConfigValidationError::Invalid(errors));
        }
        Ok((resolved, warnings))
    }

    fn collect(&self, env: impl Fn(&str) -> Option<String>) -> (ResolvedConfig, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let (bounds, i) = self.conversation.to_bounds();
        issues.extend(i);
        let (report_style, i) = self.conversation.parse_report_style();
        issues.extend(i);
        let (quota_limits, i) = self.quota.to_limits();
        issues.extend(i);
        let (dispatch, i) = self.dispatch.to_settings();
        issues.extend(i);

        let (providers, i) = self.provider_configs(&env);
        issues.extend(i);
        let (roster, default_selection, i) = self.advisor_roster();
        issues.extend(i);

        let resolved = ResolvedConfig {
            bounds,
            report_style,
            quota_limits,
            quota_state_path: self.quota.state_path(),
            dispatch,
            providers,
            roster,
            default_selection,
            output: self.output.clone(),
            logging: self.logging.clone(),
        };
        (resolved, issues)
    }

    /// Enabled providers in priority order, with overrides applied
    fn provider_configs(
        &self,
        env: &impl Fn(&str) -> Option<String>,
    ) -> (Vec<consortium_domain::ProviderConfig>, Vec<ConfigIssue>) {
        let (priority, mut issues) = self.dispatch.parse_priority();

        for name in self.providers.keys() {
            if name.parse::<ProviderId>().is_err() {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownName,
                    format!("providers.{}: unknown provider, section ignored", name),
                ));
            }
        }

        let mut configs = Vec::new();
        for id in priority {
            let file = self
                .providers
                .iter()
                .find(|(name, _)| name.parse::<ProviderId>().ok() == Some(id))
                .map(|(_, file)| file.clone())
                .unwrap_or_default();
            if !file.enabled {
                continue;
            }
            let (config, i) = file.to_provider_config(id, env);
            issues.extend(i);
            configs.push(config);
        }
        (configs, issues)
    }

    fn advisor_roster(&self) -> (AdvisorRoster, AdvisorSelection, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut overrides = BTreeMap::new();

        for (name, file) in &self.advisors {
            match name.parse::<AdvisorId>() {
                Ok(id) => {
                    overrides.insert(id, file);
                }
                Err(_) => issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownName,
                    format!("advisors.{}: unknown advisor, section ignored", name),
                )),
            }
        }

        let mut entries = Vec::new();
        let mut selection = AdvisorSelection::defaults();
        let empty = FileAdvisorConfig::default();
        for id in AdvisorId::ALL {
            let file = overrides.get(&id).copied().unwrap_or(&empty);
            let (entry, i) = file.to_entry(id);
            issues.extend(i);
            entries.push(entry);
            if let Some(enabled) = file.enabled {
                selection.set(id, enabled);
            }
        }

        let roster = AdvisorRoster::from_entries(entries);
        let usable = roster.resolve(&selection);
        if usable.is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::NoDefaultAdvisors,
                "advisors: no advisor is enabled by default; every run must name its advisors",
            ));
        }
        (roster, selection, issues)
    }
}
