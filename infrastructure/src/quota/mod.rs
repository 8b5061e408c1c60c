pub mod file_store;

pub use file_store::{JsonFileQuotaStore, QUOTA_FILE_NAME};
