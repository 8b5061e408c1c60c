//! Output formatter trait

use consortium_domain::{ConversationOutcome, OutputFormat};

/// Trait for rendering a finished conversation
pub trait OutputFormatter {
    /// Transcript grouped by round, followed by the report
    fn format_full(&self, outcome: &ConversationOutcome) -> String;

    /// Only the final report
    fn format_report(&self, outcome: &ConversationOutcome) -> String;

    /// Serialized outcome
    fn format_json(&self, outcome: &ConversationOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Render in the requested format
    fn render(&self, outcome: &ConversationOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format_full(outcome),
            OutputFormat::Report => self.format_report(outcome),
            OutputFormat::Json => self.format_json(outcome),
            OutputFormat::Markdown => super::markdown::MarkdownFormatter.format_full(outcome),
        }
    }
}
