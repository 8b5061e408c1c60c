//! Presentation layer for consortium
//!
//! This crate contains the CLI definition, output formatters and
//! progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use output::markdown::MarkdownFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
