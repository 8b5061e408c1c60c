//! CLI command definitions

use clap::Parser;
use consortium_domain::{AdvisorId, AdvisorSelection, OutputFormat, ReportStyle};
use std::path::PathBuf;

/// CLI arguments for consortium
#[derive(Parser, Debug)]
#[command(name = "consortium")]
#[command(author, version, about = "Advisory consortium - a panel of AI advisors reviews your project idea")]
#[command(long_about = r#"
Consortium runs a multi-round conversation between role-based AI advisors
(product manager, business analyst, software engineer, ...) about a project
brief, then asks the lead advisor for a final report.

Completions are dispatched across a prioritized list of providers (local
Ollama first, then metered cloud APIs). When every provider is unavailable
the advisors answer from built-in offline templates, so a run always
finishes.

Configuration files are loaded from (in priority order):
1. CONSORTIUM_* environment variables
2. --config <path>            Explicit config file
3. ./consortium.toml          Project-level config
4. ~/.config/consortium/config.toml   Global config

Example:
  consortium "A marketplace for second-hand camera gear"
  consortium -a pm -a security -a finance --rounds 3 "Budgeting app for students"
  consortium --offline -o markdown "Fitness tracker for seniors" > plan.md
"#)]
pub struct Cli {
    /// The project brief to discuss
    pub brief: Option<String>,

    /// Advisors to include (repeatable); defaults come from the config
    #[arg(short, long = "advisor", value_name = "ADVISOR")]
    pub advisors: Vec<AdvisorId>,

    /// Number of discussion rounds
    #[arg(short, long, value_name = "N")]
    pub rounds: Option<usize>,

    /// Final report style: executive_summary, detailed_analysis, technical_specification
    #[arg(short, long, value_name = "STYLE")]
    pub style: Option<ReportStyle>,

    /// Skip all providers and answer from offline templates
    #[arg(long)]
    pub offline: bool,

    /// Output format: full, report, json, markdown
    #[arg(short, long, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Show provider status and today's quota usage, then exit
    #[arg(long)]
    pub show_providers: bool,
}

impl Cli {
    /// Advisors named on the command line, or `default` when none were
    pub fn selection(&self, default: &AdvisorSelection) -> AdvisorSelection {
        if self.advisors.is_empty() {
            default.clone()
        } else {
            AdvisorSelection::only(self.advisors.iter().copied())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::try_parse_from([
            "consortium",
            "-a",
            "pm",
            "-a",
            "security",
            "--rounds",
            "3",
            "--style",
            "technical",
            "-o",
            "md",
            "--offline",
            "-vv",
            "Budgeting app",
        ])
        .unwrap();

        assert_eq!(cli.brief.as_deref(), Some("Budgeting app"));
        assert_eq!(
            cli.advisors,
            vec![AdvisorId::ProductManager, AdvisorId::SecurityExpert]
        );
        assert_eq!(cli.rounds, Some(3));
        assert_eq!(cli.style, Some(ReportStyle::TechnicalSpecification));
        assert_eq!(cli.output, Some(OutputFormat::Markdown));
        assert!(cli.offline);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_unknown_advisor_rejected() {
        assert!(Cli::try_parse_from(["consortium", "-a", "astrologer", "idea"]).is_err());
    }

    #[test]
    fn test_selection_falls_back_to_default() {
        let cli = Cli::try_parse_from(["consortium", "idea"]).unwrap();
        let default = AdvisorSelection::defaults();
        assert_eq!(cli.selection(&default), default);

        let cli = Cli::try_parse_from(["consortium", "-a", "ux", "idea"]).unwrap();
        assert_eq!(
            cli.selection(&default).enabled_ids(),
            vec![AdvisorId::UxDesigner]
        );
    }
}
