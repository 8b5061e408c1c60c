//! Markdown rendering, suitable for saving a run to a file.

use crate::output::console::ConsoleFormatter;
use crate::output::formatter::OutputFormatter;
use consortium_domain::ConversationOutcome;

pub struct MarkdownFormatter;

impl OutputFormatter for MarkdownFormatter {
    fn format_full(&self, outcome: &ConversationOutcome) -> String {
        let mut doc = String::new();
        doc.push_str("# Advisory Consortium\n\n");
        doc.push_str(&format!(
            "> {}\n\n",
            ConsoleFormatter::brief(outcome).replace('\n', "\n> ")
        ));
        let team: Vec<_> = outcome.advisors.iter().map(|a| a.label()).collect();
        doc.push_str(&format!("**Team:** {}  \n", team.join(", ")));
        doc.push_str(&format!(
            "**Rounds:** {}  \n**Report style:** {}\n",
            outcome.rounds, outcome.report_style
        ));

        for round in 1..=outcome.rounds {
            doc.push_str(&format!("\n## Round {}\n", round));
            for turn in ConsoleFormatter::round_turns(outcome, round) {
                doc.push_str(&format!(
                    "\n### {}\n\n{}\n",
                    turn.agent_label.as_deref().unwrap_or("Advisor"),
                    turn.content.trim()
                ));
            }
        }

        doc.push_str(&self.format_report(outcome));
        doc
    }

    fn format_report(&self, outcome: &ConversationOutcome) -> String {
        format!(
            "\n## {}\n\n_Prepared by {}_\n\n{}\n",
            outcome.report_style,
            outcome.synthesizer.label(),
            outcome.report.trim()
        )
    }
}
