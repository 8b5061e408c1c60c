//! Application layer for consortium
//!
//! This crate contains use cases, the provider dispatch engine, port
//! definitions and application configuration. It depends only on the
//! domain layer.

pub mod advisor;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use advisor::Advisor;
pub use config::{ConversationBounds, DispatchSettings};
pub use context::ConsortiumContext;
pub use dispatch::{ProviderDispatcher, ProviderStatus, QuotaLedger, RateLimiter};
pub use ports::{
    clock::{Clock, SystemClock},
    completion_provider::{Completion, CompletionProvider, ProviderError},
    conversation_logger::{
        ConversationEvent, ConversationEventKind, ConversationLogger, NoConversationLogger,
    },
    llm_gateway::{CompletionRequest, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
    quota_store::{InMemoryQuotaStore, QuotaStore, QuotaStoreError},
};
pub use use_cases::run_conversation::{
    RunConversationError, RunConversationInput, RunConversationUseCase,
};
