//! Conversation domain.
//!
//! - [`state::ConversationState`]: paired api/display histories
//! - [`report_style::ReportStyle`]: the requested final report format
//! - [`outcome::ConversationOutcome`]: transcript plus report

pub mod outcome;
pub mod report_style;
pub mod state;
