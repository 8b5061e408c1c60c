//! Progress notification port
//!
//! Defines the interface for reporting progress while a conversation runs.

use consortium_domain::AdvisorId;

/// Callback for progress updates during a conversation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain lines, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called once before the first round
    fn on_conversation_start(&self, advisors: &[AdvisorId], rounds: usize);

    /// Called when a round starts (1-based)
    fn on_round_start(&self, round: usize, total_rounds: usize);

    /// Called when an advisor is about to speak
    fn on_advisor_start(&self, _advisor: AdvisorId, _round: usize) {}

    /// Called when an advisor's turn has been recorded
    fn on_advisor_complete(&self, advisor: AdvisorId, round: usize);

    /// Called when a round ends
    fn on_round_complete(&self, _round: usize) {}

    /// Called before the final report is requested
    fn on_report_start(&self, synthesizer: AdvisorId);

    /// Called when the final report is ready
    fn on_report_complete(&self);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_conversation_start(&self, _advisors: &[AdvisorId], _rounds: usize) {}
    fn on_round_start(&self, _round: usize, _total_rounds: usize) {}
    fn on_advisor_complete(&self, _advisor: AdvisorId, _round: usize) {}
    fn on_report_start(&self, _synthesizer: AdvisorId) {}
    fn on_report_complete(&self) {}
}
