//! Console output formatter for conversation results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use consortium_application::ProviderStatus;
use consortium_domain::{ConversationOutcome, Message, ProviderHealth, Role, UsageStats};

/// Formats conversation results for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Advisor turns of one round, in speaking order
    pub(crate) fn round_turns(outcome: &ConversationOutcome, round: usize) -> Vec<&Message> {
        outcome
            .transcript
            .iter()
            .filter(|m| m.role == Role::Assistant && m.round == Some(round))
            .collect()
    }

    /// The brief as the caller submitted it
    pub(crate) fn brief(outcome: &ConversationOutcome) -> &str {
        outcome
            .transcript
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default()
    }

    pub fn format(outcome: &ConversationOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Advisory Consortium"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n\n",
            "Project:".cyan().bold(),
            Self::brief(outcome)
        ));

        let team: Vec<_> = outcome.advisors.iter().map(|a| a.label()).collect();
        output.push_str(&format!("{} {}\n", "Team:".cyan().bold(), team.join(", ")));
        output.push_str(&format!(
            "{} {} round(s), {}\n",
            "Format:".cyan().bold(),
            outcome.rounds,
            outcome.report_style
        ));

        for round in 1..=outcome.rounds {
            output.push_str(&Self::section_header(&format!("Round {}", round)));
            for turn in Self::round_turns(outcome, round) {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("── {} ──", turn.agent_label.as_deref().unwrap_or("Advisor"))
                        .yellow()
                        .bold(),
                    turn.content
                ));
            }
        }

        output.push_str(&Self::section_header(&format!(
            "Final Report: {}",
            outcome.report_style
        )));
        output.push_str(&format!(
            "\n{}\n\n{}\n",
            format!("Prepared by {}", outcome.synthesizer.label())
                .yellow()
                .bold(),
            outcome.report
        ));

        output.push_str(&Self::footer());
        output
    }

    pub fn format_report_only(outcome: &ConversationOutcome) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "\n{}\n\n",
            format!("=== {} ===", outcome.report_style).cyan().bold()
        ));
        let team: Vec<_> = outcome.advisors.iter().map(|a| a.label()).collect();
        output.push_str(&format!(
            "{} {}\n\n",
            "Advisors consulted:".dimmed(),
            team.join(", ")
        ));
        output.push_str(&outcome.report);
        output.push('\n');
        output
    }

    /// Provider table plus today's metered usage (for `--show-providers`)
    pub fn format_provider_status(providers: &[ProviderStatus], usage: &UsageStats) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header("Providers (priority order)"));

        for p in providers {
            let health = match (p.active, p.health) {
                (false, _) => "inactive".dimmed(),
                (true, ProviderHealth::Active) => "active".green(),
                (true, ProviderHealth::Degraded) => "degraded".yellow(),
                (true, ProviderHealth::Disabled) => "disabled".red(),
            };
            let rpm = match (p.requests_per_minute_limit, p.permits_available) {
                (Some(limit), Some(left)) => format!("{}/{}/min", left, limit),
                (Some(limit), None) => format!("{}/min", limit),
                (None, _) => "unlimited".to_string(),
            };
            output.push_str(&format!(
                "  {:<24} {:<10} {:<40} {:>12}{}\n",
                p.display_name,
                health,
                p.model,
                rpm,
                if p.metered { "  metered" } else { "" }
            ));
        }

        output.push_str(&Self::section_header("Quota"));
        output.push_str(&format!(
            "  {}: {} / {} tokens ({:.1}%), {} remaining\n",
            usage.date,
            usage.tokens_used_today,
            usage.daily_limit,
            usage.usage_percentage,
            usage.remaining_tokens
        ));
        output.push_str(&format!(
            "  requests in the last minute: {}, can proceed: {}\n",
            usage.requests_last_minute,
            if usage.can_proceed {
                "yes".green()
            } else {
                "no".red()
            }
        ));
        if !usage.persistent {
            output.push_str(&format!(
                "  {}\n",
                "quota state could not be saved, tracking in memory only".yellow()
            ));
        }
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_full(&self, outcome: &ConversationOutcome) -> String {
        Self::format(outcome)
    }

    fn format_report(&self, outcome: &ConversationOutcome) -> String {
        Self::format_report_only(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::sample_outcome;
    use chrono::NaiveDate;
    use consortium_domain::{OutputFormat, ProviderId};

    #[test]
    fn test_full_output_groups_rounds_and_report() {
        colored::control::set_override(false);
        let text = ConsoleFormatter.render(&sample_outcome(), OutputFormat::Full);

        assert!(text.contains("Project: Camera gear marketplace"));
        assert!(text.contains("Team: Product Manager, Software Engineer"));
        let round1 = text.find("Round 1").unwrap();
        let round2 = text.find("Round 2").unwrap();
        let report = text.find("Final Report: Executive Summary").unwrap();
        assert!(round1 < round2 && round2 < report);
        assert!(text.contains("── Software Engineer ──\nUse a managed database."));
        // the report appears once, under its own heading
        assert_eq!(text.matches("Ship the MVP in 8 weeks.").count(), 1);
    }

    #[test]
    fn test_report_only() {
        colored::control::set_override(false);
        let text = ConsoleFormatter.render(&sample_outcome(), OutputFormat::Report);
        assert!(text.contains("=== Executive Summary ==="));
        assert!(text.contains("Ship the MVP in 8 weeks."));
        assert!(!text.contains("Round 1"));
    }

    #[test]
    fn test_provider_status_shows_permits_and_persistence() {
        colored::control::set_override(false);
        let providers = vec![ProviderStatus {
            id: ProviderId::Groq,
            display_name: "Groq".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            active: true,
            health: ProviderHealth::Degraded,
            consecutive_timeouts: 1,
            requests_per_minute_limit: Some(30),
            permits_available: Some(12),
            metered: true,
        }];
        let usage = UsageStats {
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            tokens_used_today: 2500,
            daily_limit: 100_000,
            remaining_tokens: 97_500,
            usage_percentage: 2.5,
            requests_last_minute: 3,
            can_proceed: true,
            persistent: false,
        };

        let text = ConsoleFormatter::format_provider_status(&providers, &usage);
        assert!(text.contains("degraded"));
        assert!(text.contains("12/30/min"));
        assert!(text.contains("2500 / 100000 tokens (2.5%)"));
        assert!(text.contains("tracking in memory only"));
    }

    #[test]
    fn test_json_round_trips_outcome() {
        let outcome = sample_outcome();
        let text = ConsoleFormatter.render(&outcome, OutputFormat::Json);
        let parsed: ConversationOutcome = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, outcome);
    }
}
