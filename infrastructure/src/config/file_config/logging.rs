//! Logging configuration from TOML (`[logging]` section)

use super::expand_home;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ```toml
/// [logging]
/// dir = "~/.local/state/consortium/logs"      # daily-rolling tracing files
/// conversation_log = "./transcripts"          # one JSONL file per run
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    pub dir: Option<String>,
    pub conversation_log: Option<String>,
}

impl FileLoggingConfig {
    pub fn dir_path(&self) -> Option<PathBuf> {
        self.dir.as_deref().and_then(expand_home)
    }

    pub fn conversation_log_dir(&self) -> Option<PathBuf> {
        self.conversation_log.as_deref().and_then(expand_home)
    }
}
