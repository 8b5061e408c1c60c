//! Conversation configuration from TOML (`[conversation]` section)

use consortium_application::ConversationBounds;
use consortium_domain::{ConfigIssue, ConfigIssueCode, ReportStyle};
use serde::{Deserialize, Serialize};

/// # Example
///
/// ```toml
/// [conversation]
/// default_rounds = 2
/// min_rounds = 1
/// max_rounds = 5
/// report_style = "executive_summary"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConversationConfig {
    pub default_rounds: usize,
    pub min_rounds: usize,
    pub max_rounds: usize,
    /// `executive_summary`, `detailed_analysis` or `technical_specification`
    pub report_style: String,
}

impl Default for FileConversationConfig {
    fn default() -> Self {
        let bounds = ConversationBounds::default();
        Self {
            default_rounds: bounds.default_rounds,
            min_rounds: bounds.min_rounds,
            max_rounds: bounds.max_rounds,
            report_style: ReportStyle::default().as_str().to_string(),
        }
    }
}

impl FileConversationConfig {
    /// Round bounds; zero or inverted bounds are an error.
    pub fn to_bounds(&self) -> (ConversationBounds, Vec<ConfigIssue>) {
        let bounds = ConversationBounds {
            min_rounds: self.min_rounds,
            max_rounds: self.max_rounds,
            default_rounds: self.default_rounds,
        };
        let valid = self.min_rounds >= 1
            && self.min_rounds <= self.max_rounds
            && (self.min_rounds..=self.max_rounds).contains(&self.default_rounds);
        if valid {
            return (bounds, vec![]);
        }
        let issue = ConfigIssue::error(
            ConfigIssueCode::InvalidRoundBounds,
            format!(
                "conversation: rounds must satisfy 1 <= min_rounds ({}) <= default_rounds ({}) <= max_rounds ({})",
                self.min_rounds, self.default_rounds, self.max_rounds
            ),
        );
        (ConversationBounds::default(), vec![issue])
    }

    pub fn parse_report_style(&self) -> (ReportStyle, Vec<ConfigIssue>) {
        match self.report_style.parse::<ReportStyle>() {
            Ok(style) => (style, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::UnknownName,
                    format!(
                        "conversation.report_style: unknown value '{}', falling back to '{}'",
                        self.report_style,
                        ReportStyle::default().as_str()
                    ),
                );
                (ReportStyle::default(), vec![issue])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let (bounds, issues) = FileConversationConfig::default().to_bounds();
        assert!(issues.is_empty());
        assert_eq!(bounds, ConversationBounds::default());
    }

    #[test]
    fn test_inverted_bounds_are_an_error() {
        let config = FileConversationConfig {
            min_rounds: 4,
            max_rounds: 2,
            ..Default::default()
        };
        let (_, issues) = config.to_bounds();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert_eq!(issues[0].code, ConfigIssueCode::InvalidRoundBounds);
    }

    #[test]
    fn test_report_style_alias_and_fallback() {
        let config = FileConversationConfig {
            report_style: "technical".into(),
            ..Default::default()
        };
        assert_eq!(
            config.parse_report_style().0,
            ReportStyle::TechnicalSpecification
        );

        let config = FileConversationConfig {
            report_style: "haiku".into(),
            ..Default::default()
        };
        let (style, issues) = config.parse_report_style();
        assert_eq!(style, ReportStyle::ExecutiveSummary);
        assert!(!issues[0].is_error());
    }
}
