//! Quota accounting for metered providers

pub mod record;

pub use record::{
    QuotaDenial, QuotaLimits, QuotaRecord, QuotaReservation, RATE_WINDOW, StoredUsage, UsageStats,
    estimate_tokens,
};
