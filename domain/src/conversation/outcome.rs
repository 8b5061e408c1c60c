//! Result of a completed conversation

use super::report_style::ReportStyle;
use crate::advisor::id::AdvisorId;
use crate::session::entities::Message;
use serde::{Deserialize, Serialize};

/// Everything a front end needs to render one consultation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationOutcome {
    /// Team header describing the assignment (not sent to providers)
    pub header: String,
    /// Display transcript: the brief followed by every labeled advisor turn
    pub transcript: Vec<Message>,
    /// Final synthesized report
    pub report: String,
    /// Advisor that wrote the report
    pub synthesizer: AdvisorId,
    pub report_style: ReportStyle,
    pub rounds: usize,
    /// Advisors that took part, in canonical order
    pub advisors: Vec<AdvisorId>,
}
