//! Output format value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// How a finished conversation is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Transcript followed by the report (default)
    #[default]
    Full,
    /// Only the final report
    Report,
    /// Serialized outcome
    Json,
    /// Markdown document suitable for saving
    Markdown,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Full => "full",
            OutputFormat::Report => "report",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(OutputFormat::Full),
            "report" | "synthesis" => Ok(OutputFormat::Report),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(DomainError::UnknownOutputFormat(s.to_string())),
        }
    }
}
