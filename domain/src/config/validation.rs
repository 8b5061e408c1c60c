//! Structured configuration issues.
//!
//! Validation never fails fast: it collects every problem it can find and
//! lets the caller decide (errors abort start-up, warnings are logged).

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// Advisor temperature outside `[0, 2]`.
    TemperatureOutOfRange,
    /// Advisor max output tokens is zero.
    ZeroMaxTokens,
    /// Round bounds are zero or inverted, or the default lies outside them.
    InvalidRoundBounds,
    /// Dispatch priority list is empty.
    EmptyPriority,
    /// Priority list names a provider that does not exist.
    UnknownProvider,
    /// Circuit threshold of zero would disable providers before any call.
    ZeroCircuitThreshold,
    /// Quota safety ratio outside `(0, 1]`.
    InvalidSafetyRatio,
    /// Unknown advisor or report style name.
    UnknownName,
    /// Every advisor is disabled by default.
    NoDefaultAdvisors,
    /// A provider in the priority list has no credential configured.
    MissingCredential,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}
