//! Provider dispatch engine.
//!
//! - [`ledger::QuotaLedger`]: daily token budget and request pacing
//! - [`rate_limiter::RateLimiter`]: per-provider token bucket
//! - [`dispatcher::ProviderDispatcher`]: priority fallback with circuit breaking

pub mod dispatcher;
pub mod ledger;
pub mod rate_limiter;

pub use dispatcher::{ProviderDispatcher, ProviderStatus};
pub use ledger::QuotaLedger;
pub use rate_limiter::RateLimiter;
