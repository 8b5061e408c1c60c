//! Final report style value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Shape of the final synthesized report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStyle {
    #[default]
    ExecutiveSummary,
    DetailedAnalysis,
    TechnicalSpecification,
}

impl ReportStyle {
    pub const ALL: [ReportStyle; 3] = [
        ReportStyle::ExecutiveSummary,
        ReportStyle::DetailedAnalysis,
        ReportStyle::TechnicalSpecification,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStyle::ExecutiveSummary => "executive_summary",
            ReportStyle::DetailedAnalysis => "detailed_analysis",
            ReportStyle::TechnicalSpecification => "technical_specification",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportStyle::ExecutiveSummary => "Executive Summary",
            ReportStyle::DetailedAnalysis => "Detailed Analysis",
            ReportStyle::TechnicalSpecification => "Technical Specification",
        }
    }
}

impl std::fmt::Display for ReportStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

impl std::str::FromStr for ReportStyle {
    type Err = DomainError;

    /// Accepts the snake_case id, the title, or a short alias
    /// (`executive`, `summary`, `detailed`, `analysis`, `technical`, `spec`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "executive_summary" | "executive" | "summary" => Ok(ReportStyle::ExecutiveSummary),
            "detailed_analysis" | "detailed" | "analysis" => Ok(ReportStyle::DetailedAnalysis),
            "technical_specification" | "technical" | "spec" => {
                Ok(ReportStyle::TechnicalSpecification)
            }
            _ => Err(DomainError::UnknownReportStyle(s.to_string())),
        }
    }
}
