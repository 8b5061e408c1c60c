//! Quota configuration from TOML (`[quota]` section)

use super::expand_home;
use consortium_domain::{ConfigIssue, ConfigIssueCode, QuotaLimits};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Limits for the metered-provider account.
///
/// ```toml
/// [quota]
/// daily_token_limit = 100000
/// safety_ratio = 0.95
/// max_requests_per_minute = 30
/// min_request_interval_ms = 2000
/// state_file = "~/.local/share/consortium/quota_tracker.json"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQuotaConfig {
    pub daily_token_limit: u64,
    pub safety_ratio: f64,
    pub max_requests_per_minute: u32,
    pub min_request_interval_ms: u64,
    /// Where the daily counter is persisted (defaults to the data dir)
    pub state_file: Option<String>,
}

impl Default for FileQuotaConfig {
    fn default() -> Self {
        let limits = QuotaLimits::default();
        Self {
            daily_token_limit: limits.daily_token_limit,
            safety_ratio: limits.safety_ratio,
            max_requests_per_minute: limits.max_requests_per_minute,
            min_request_interval_ms: limits.min_request_interval.as_millis() as u64,
            state_file: None,
        }
    }
}

impl FileQuotaConfig {
    pub fn to_limits(&self) -> (QuotaLimits, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut safety_ratio = self.safety_ratio;
        if !(safety_ratio > 0.0 && safety_ratio <= 1.0) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidSafetyRatio,
                format!("quota.safety_ratio: {} must be in (0, 1]", self.safety_ratio),
            ));
            safety_ratio = QuotaLimits::default().safety_ratio;
        }
        let limits = QuotaLimits {
            daily_token_limit: self.daily_token_limit,
            safety_ratio,
            max_requests_per_minute: self.max_requests_per_minute,
            min_request_interval: Duration::from_millis(self.min_request_interval_ms),
        };
        (limits, issues)
    }

    /// Configured state file with a leading `~/` expanded
    pub fn state_path(&self) -> Option<PathBuf> {
        self.state_file.as_deref().and_then(expand_home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_round_trip() {
        let (limits, issues) = FileQuotaConfig::default().to_limits();
        assert!(issues.is_empty());
        assert_eq!(limits, QuotaLimits::default());
    }

    #[test]
    fn test_invalid_safety_ratio() {
        let config = FileQuotaConfig {
            safety_ratio: 1.5,
            ..Default::default()
        };
        let (limits, issues) = config.to_limits();
        assert_eq!(issues[0].code, ConfigIssueCode::InvalidSafetyRatio);
        assert_eq!(limits.safety_ratio, 0.95);
    }

    #[test]
    fn test_state_path() {
        assert_eq!(FileQuotaConfig::default().state_path(), None);
        let config = FileQuotaConfig {
            state_file: Some("/tmp/q.json".into()),
            ..Default::default()
        };
        assert_eq!(config.state_path(), Some(PathBuf::from("/tmp/q.json")));
    }
}
