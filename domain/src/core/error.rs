//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are raised only while validating inputs and configuration,
/// before a conversation starts. Once orchestration begins nothing in
/// the core propagates an error to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Project brief cannot be empty")]
    EmptyBrief,

    #[error("At least one advisor must be enabled")]
    NoAdvisors,

    #[error("Round count {rounds} is outside the allowed range {min}..={max}")]
    InvalidRounds { rounds: usize, min: usize, max: usize },

    #[error("Unknown advisor: {0}")]
    UnknownAdvisor(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Unknown report style: {0}")]
    UnknownReportStyle(String),

    #[error("Unknown output format: {0}")]
    UnknownOutputFormat(String),

    #[error("Invalid advisor settings for {advisor}: {reason}")]
    InvalidAdvisorSpec { advisor: String, reason: String },
}
