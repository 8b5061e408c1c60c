//! Configuration loading for consortium
//!
//! File I/O and merging of configuration from multiple sources, plus the
//! one-time conversion into runtime types. Priority (highest to lowest):
//!
//! 1. `CONSORTIUM_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./consortium.toml` or `./.consortium.toml`
//! 4. Global: `~/.config/consortium/config.toml`
//! 5. Default values

mod file_config;
mod loader;
mod resolved;

pub use file_config::{
    ConfigValidationError, FileAdvisorConfig, FileConfig, FileConversationConfig,
    FileDispatchConfig, FileLoggingConfig, FileOutputConfig, FileProviderConfig, FileQuotaConfig,
};
pub use loader::ConfigLoader;
pub use resolved::ResolvedConfig;
