//! Structured transcript logging.
//!
//! The orchestrator reports four kinds of event: the conversation opening,
//! each advisor turn, each round synthesis, and the final report. A logger
//! persists them as machine-readable records (the JSONL adapter writes one
//! line per event). This is separate from `tracing` diagnostics.

use consortium_domain::{AdvisorId, ReportStyle};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationEventKind {
    ConversationStarted,
    AdvisorTurn,
    RoundSynthesis,
    FinalReport,
}

impl ConversationEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationEventKind::ConversationStarted => "conversation_started",
            ConversationEventKind::AdvisorTurn => "advisor_turn",
            ConversationEventKind::RoundSynthesis => "round_synthesis",
            ConversationEventKind::FinalReport => "final_report",
        }
    }
}

impl std::fmt::Display for ConversationEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transcript event. `payload` is always a JSON object; the logger
/// adds the kind and a timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationEvent {
    pub kind: ConversationEventKind,
    pub payload: Value,
}

impl ConversationEvent {
    pub fn started(brief: &str, advisors: &[AdvisorId], rounds: usize, style: ReportStyle) -> Self {
        Self {
            kind: ConversationEventKind::ConversationStarted,
            payload: json!({
                "brief": brief,
                "advisors": advisors,
                "rounds": rounds,
                "report_style": style,
            }),
        }
    }

    pub fn advisor_turn(round: usize, advisor: AdvisorId, content: &str) -> Self {
        Self {
            kind: ConversationEventKind::AdvisorTurn,
            payload: json!({
                "round": round,
                "advisor": advisor,
                "label": advisor.label(),
                "content": content,
            }),
        }
    }

    pub fn round_synthesis(round: usize, synthesis: &str) -> Self {
        Self {
            kind: ConversationEventKind::RoundSynthesis,
            payload: json!({ "round": round, "synthesis": synthesis }),
        }
    }

    pub fn final_report(synthesizer: AdvisorId, style: ReportStyle, report: &str) -> Self {
        Self {
            kind: ConversationEventKind::FinalReport,
            payload: json!({
                "synthesizer": synthesizer,
                "report_style": style,
                "bytes": report.len(),
            }),
        }
    }
}

/// Sink for transcript events. Logging never fails the conversation;
/// implementations swallow their own write errors.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Used when no transcript log is configured.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
