//! Progress reporting while a conversation runs

use colored::Colorize;
use consortium_application::ProgressNotifier;
use consortium_domain::AdvisorId;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Single progress bar over every advisor turn plus the final report
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn bar(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.bar.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_conversation_start(&self, advisors: &[AdvisorId], rounds: usize) {
        let total = advisors.len() * rounds + 1;
        let pb = ProgressBar::new(total as u64);
        pb.set_style(Self::style());
        pb.set_prefix("Consortium");
        pb.set_message("Starting...");
        pb.enable_steady_tick(Duration::from_millis(120));
        *self.bar() = Some(pb);
    }

    fn on_round_start(&self, round: usize, total_rounds: usize) {
        if let Some(pb) = self.bar().as_ref() {
            pb.set_prefix(format!("Round {}/{}", round, total_rounds));
        }
    }

    fn on_advisor_start(&self, advisor: AdvisorId, _round: usize) {
        if let Some(pb) = self.bar().as_ref() {
            pb.set_message(format!("{} is thinking...", advisor.label()));
        }
    }

    fn on_advisor_complete(&self, advisor: AdvisorId, _round: usize) {
        if let Some(pb) = self.bar().as_ref() {
            pb.set_message(format!("{} {}", "v".green(), advisor.label()));
            pb.inc(1);
        }
    }

    fn on_report_start(&self, synthesizer: AdvisorId) {
        if let Some(pb) = self.bar().as_ref() {
            pb.set_prefix("Report");
            pb.set_message(format!("{} is writing the report...", synthesizer.label()));
        }
    }

    fn on_report_complete(&self) {
        if let Some(pb) = self.bar().take() {
            pb.inc(1);
            pb.finish_and_clear();
        }
    }
}

/// Plain line-per-event progress on stderr (no terminal control codes)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_conversation_start(&self, advisors: &[AdvisorId], rounds: usize) {
        eprintln!(
            "{} {} advisor(s), {} round(s)",
            "->".cyan(),
            advisors.len(),
            rounds
        );
    }

    fn on_round_start(&self, round: usize, total_rounds: usize) {
        eprintln!("{} {}", "->".cyan(), format!("Round {}/{}", round, total_rounds).bold());
    }

    fn on_advisor_complete(&self, advisor: AdvisorId, _round: usize) {
        eprintln!("  {} {}", "v".green(), advisor.label());
    }

    fn on_report_start(&self, synthesizer: AdvisorId) {
        eprintln!("{} {} writing the report", "->".cyan(), synthesizer.label());
    }

    fn on_report_complete(&self) {
        eprintln!();
    }
}
