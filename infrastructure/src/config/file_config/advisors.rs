//! Advisor configuration from TOML (`[advisors.<id>]` tables)

use consortium_domain::{
    AdvisorId, AdvisorSpec, ConfigIssue, ConfigIssueCode, DomainError, MAX_TEMPERATURE,
    RosterEntry,
};
use serde::{Deserialize, Serialize};

/// Overrides for one advisor.
///
/// ```toml
/// [advisors.security_expert]
/// enabled = true         # selected when the caller names no advisors
/// temperature = 0.2
/// max_output_tokens = 600
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAdvisorConfig {
    /// Part of the default selection
    pub enabled: Option<bool>,
    /// `false` takes the advisor out of the roster entirely
    pub available: Option<bool>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    /// Replaces the built-in instruction preamble
    pub preamble: Option<String>,
}

impl FileAdvisorConfig {
    /// Roster entry for `id` with overrides applied.
    ///
    /// Invalid sampling settings are reported as errors and the built-in
    /// spec is used in their place.
    pub fn to_entry(&self, id: AdvisorId) -> (RosterEntry, Vec<ConfigIssue>) {
        if self.available == Some(false) {
            return (
                RosterEntry::Disabled {
                    id,
                    reason: "disabled in configuration".to_string(),
                },
                vec![],
            );
        }

        let builtin = AdvisorSpec::builtin(id);
        let result = AdvisorSpec::new(
            id,
            self.preamble
                .clone()
                .unwrap_or_else(|| builtin.instruction_preamble.clone()),
            self.temperature.unwrap_or(builtin.temperature),
            self.max_output_tokens.unwrap_or(builtin.max_output_tokens),
        );

        match result {
            Ok(spec) => (RosterEntry::Available(spec), vec![]),
            Err(e) => {
                let code = if self
                    .temperature
                    .is_some_and(|t| !(0.0..=MAX_TEMPERATURE).contains(&t))
                {
                    ConfigIssueCode::TemperatureOutOfRange
                } else if self.max_output_tokens == Some(0) {
                    ConfigIssueCode::ZeroMaxTokens
                } else {
                    ConfigIssueCode::UnknownName
                };
                let message = match e {
                    DomainError::InvalidAdvisorSpec { reason, .. } => {
                        format!("advisors.{}: {}", id, reason)
                    }
                    other => format!("advisors.{}: {}", id, other),
                };
                (
                    RosterEntry::Available(builtin),
                    vec![ConfigIssue::error(code, message)],
                )
            }
        }
    }
}
