//! Durable storage for the quota ledger.
//!
//! The persisted record is tiny (`{date, tokens_used}`) and is read once at
//! start-up and written after each billed request.

use consortium_domain::StoredUsage;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuotaStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid quota record: {0}")]
    Serde(#[from] serde_json::Error),
}

pub trait QuotaStore: Send + Sync {
    /// Load the stored record; `Ok(None)` when nothing was stored yet
    fn load(&self) -> Result<Option<StoredUsage>, QuotaStoreError>;

    fn save(&self, usage: &StoredUsage) -> Result<(), QuotaStoreError>;
}

/// Process-local store, for tests and for deployments without a state file.
#[derive(Debug, Default)]
pub struct InMemoryQuotaStore {
    record: Mutex<Option<StoredUsage>>,
}

impl InMemoryQuotaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(usage: StoredUsage) -> Self {
        Self {
            record: Mutex::new(Some(usage)),
        }
    }

    pub fn current(&self) -> Option<StoredUsage> {
        self.record
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl QuotaStore for InMemoryQuotaStore {
    fn load(&self) -> Result<Option<StoredUsage>, QuotaStoreError> {
        Ok(self.current())
    }

    fn save(&self, usage: &StoredUsage) -> Result<(), QuotaStoreError> {
        *self
            .record
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(usage.clone());
        Ok(())
    }
}
