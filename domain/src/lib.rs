//! Domain layer for consortium
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Advisors
//!
//! A fixed, closed set of advisor roles ([`AdvisorId`]) speaks in a
//! canonical order. Each role has an immutable [`AdvisorSpec`]: an
//! instruction preamble plus sampling parameters. The [`AdvisorRoster`]
//! is the start-up registry; roles that are not configured are present as
//! typed `Disabled` entries rather than missing.
//!
//! ## Conversation
//!
//! A [`ConversationState`] keeps two append-only views of the same
//! exchange: the clean api history replayed to providers, and the labeled
//! display history shown to people.
//!
//! ## Providers and quota
//!
//! [`ProviderConfig`], [`CircuitState`] and [`QuotaRecord`] hold the rules
//! the dispatcher applies; the [`OfflineFallback`] guarantees an answer
//! when every provider is unavailable.

pub mod advisor;
pub mod config;
pub mod conversation;
pub mod core;
pub mod fallback;
pub mod prompt;
pub mod providers;
pub mod quota;
pub mod session;

// Re-export commonly used types
pub use advisor::{
    id::AdvisorId,
    roster::{AdvisorRoster, AdvisorSelection, RosterEntry},
    spec::{AdvisorSpec, MAX_TEMPERATURE, SamplingParams},
};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use conversation::{
    outcome::ConversationOutcome, report_style::ReportStyle, state::ConversationState,
};
pub use core::{brief::ProjectBrief, error::DomainError, string::excerpt};
pub use fallback::{OfflineFallback, ProjectCategory};
pub use prompt::{ReportTemplate, SYNTHESIS_EXCERPT_BYTES, default_preamble};
pub use providers::{
    ProviderConfig, ProviderId, WireFormat,
    circuit::{CircuitState, DEFAULT_CIRCUIT_THRESHOLD, ProviderHealth},
};
pub use quota::{
    QuotaDenial, QuotaLimits, QuotaRecord, QuotaReservation, StoredUsage, UsageStats,
    estimate_tokens,
};
pub use session::entities::{Message, Role};
