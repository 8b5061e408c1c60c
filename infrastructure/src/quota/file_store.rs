//! JSON file persistence for the daily quota record.
//!
//! The file holds `{"date": "YYYY-MM-DD", "tokens_used": N}`. Writes go
//! to a sibling temp file first and are renamed into place.

use consortium_application::{QuotaStore, QuotaStoreError};
use consortium_domain::StoredUsage;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default file name inside the data directory
pub const QUOTA_FILE_NAME: &str = "quota_tracker.json";

pub struct JsonFileQuotaStore {
    path: PathBuf,
}

impl JsonFileQuotaStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/consortium/quota_tracker.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("consortium").join(QUOTA_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QuotaStore for JsonFileQuotaStore {
    fn load(&self) -> Result<Option<StoredUsage>, QuotaStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, usage: &StoredUsage) -> Result<(), QuotaStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(usage)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
