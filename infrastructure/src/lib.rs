//! Infrastructure layer for consortium
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: HTTP completion providers, the quota file store, the
//! JSONL transcript logger, and configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod quota;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAdvisorConfig, FileConfig, FileConversationConfig,
    FileDispatchConfig, FileLoggingConfig, FileOutputConfig, FileProviderConfig, FileQuotaConfig,
    ResolvedConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::{
    ChatCompletionsProvider, CohereProvider, HuggingFaceProvider, OllamaProvider, build_provider,
    build_providers,
};
pub use quota::{JsonFileQuotaStore, QUOTA_FILE_NAME};
