//! Runtime view of a validated configuration.

use super::file_config::{FileLoggingConfig, FileOutputConfig};
use consortium_application::{ConversationBounds, DispatchSettings};
use consortium_domain::{AdvisorRoster, AdvisorSelection, ProviderConfig, QuotaLimits, ReportStyle};
use std::path::PathBuf;

/// Immutable settings built once at start-up from a [`FileConfig`](super::FileConfig).
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub bounds: ConversationBounds,
    pub report_style: ReportStyle,
    pub quota_limits: QuotaLimits,
    /// `None` means the platform data directory
    pub quota_state_path: Option<PathBuf>,
    pub dispatch: DispatchSettings,
    /// Enabled providers, highest priority first
    pub providers: Vec<ProviderConfig>,
    pub roster: AdvisorRoster,
    /// Advisors used when the caller names none
    pub default_selection: AdvisorSelection,
    pub output: FileOutputConfig,
    pub logging: FileLoggingConfig,
}
