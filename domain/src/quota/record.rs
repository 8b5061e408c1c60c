//! Daily token budget and request-rate accounting for one metered account.

use crate::session::entities::Message;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;
use thiserror::Error;

/// Length of the trailing request-rate window
pub const RATE_WINDOW: Duration = Duration::from_secs(60);

/// Limits applied by the ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuotaLimits {
    pub daily_token_limit: u64,
    /// Fraction of the daily limit that may actually be spent
    pub safety_ratio: f64,
    pub max_requests_per_minute: u32,
    pub min_request_interval: Duration,
}

impl Default for QuotaLimits {
    fn default() -> Self {
        Self {
            daily_token_limit: 100_000,
            safety_ratio: 0.95,
            max_requests_per_minute: 30,
            min_request_interval: Duration::from_secs(2),
        }
    }
}

impl QuotaLimits {
    /// Tokens that may be used today before requests are refused
    pub fn effective_budget(&self) -> u64 {
        (self.daily_token_limit as f64 * self.safety_ratio).floor() as u64
    }
}

/// Why a request was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuotaDenial {
    #[error("daily budget would be exceeded: {used} used + {estimated} estimated > {budget}")]
    DailyBudget { used: u64, estimated: u64, budget: u64 },

    #[error("too many requests: {count} in the last minute (limit {limit})")]
    RequestsPerMinute { count: usize, limit: u32 },

    #[error("requests too close together: wait {}ms", wait.as_millis())]
    MinInterval { wait: Duration },
}

/// The persisted shape: `{date, tokens_used}` and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUsage {
    pub date: NaiveDate,
    pub tokens_used: u64,
}

/// Read-only view for observability collaborators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageStats {
    pub date: NaiveDate,
    pub tokens_used_today: u64,
    pub daily_limit: u64,
    pub remaining_tokens: u64,
    pub usage_percentage: f64,
    pub requests_last_minute: usize,
    pub can_proceed: bool,
    /// Whether usage still reaches durable storage
    pub persistent: bool,
}

/// A request slot taken under the quota rules, awaiting the real usage.
///
/// Reserving records the request timestamp and the estimated tokens at
/// once, so concurrent callers see each other before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaReservation {
    pub date: NaiveDate,
    pub at: NaiveDateTime,
    pub estimated_tokens: u64,
}

/// In-memory quota state for the current calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotaRecord {
    pub date: NaiveDate,
    pub tokens_used_today: u64,
    pub request_timestamps: VecDeque<NaiveDateTime>,
}

impl QuotaRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            tokens_used_today: 0,
            request_timestamps: VecDeque::new(),
        }
    }

    /// Rebuild from storage; a record from another day starts at zero.
    pub fn from_stored(stored: Option<StoredUsage>, today: NaiveDate) -> Self {
        match stored {
            Some(s) if s.date == today => Self {
                tokens_used_today: s.tokens_used,
                ..Self::new(today)
            },
            _ => Self::new(today),
        }
    }

    pub fn to_stored(&self) -> StoredUsage {
        StoredUsage {
            date: self.date,
            tokens_used: self.tokens_used_today,
        }
    }

    /// Reset the counter when the calendar day changed. Returns true on rollover.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if self.date == today {
            return false;
        }
        self.date = today;
        self.tokens_used_today = 0;
        true
    }

    fn prune(&mut self, now: NaiveDateTime) {
        while let Some(oldest) = self.request_timestamps.front() {
            match (now - *oldest).to_std() {
                Ok(age) if age < RATE_WINDOW => break,
                // Entries in the future (clock moved backwards) are kept
                Err(_) => break,
                Ok(_) => {
                    self.request_timestamps.pop_front();
                }
            }
        }
    }

    pub fn requests_in_window(&mut self, now: NaiveDateTime) -> usize {
        self.prune(now);
        self.request_timestamps.len()
    }

    pub fn check(
        &mut self,
        estimated_tokens: u64,
        limits: &QuotaLimits,
        now: NaiveDateTime,
    ) -> Result<(), QuotaDenial> {
        self.roll_over(now.date());

        let budget = limits.effective_budget();
        if self.tokens_used_today.saturating_add(estimated_tokens) > budget {
            return Err(QuotaDenial::DailyBudget {
                used: self.tokens_used_today,
                estimated: estimated_tokens,
                budget,
            });
        }

        let count = self.requests_in_window(now);
        if count >= limits.max_requests_per_minute as usize {
            return Err(QuotaDenial::RequestsPerMinute {
                count,
                limit: limits.max_requests_per_minute,
            });
        }

        if let Some(last) = self.request_timestamps.back()
            && let Ok(elapsed) = (now - *last).to_std()
            && elapsed < limits.min_request_interval
        {
            return Err(QuotaDenial::MinInterval {
                wait: limits.min_request_interval - elapsed,
            });
        }

        Ok(())
    }

    pub fn record(&mut self, tokens_used: u64, now: NaiveDateTime) {
        self.roll_over(now.date());
        self.prune(now);
        self.request_timestamps.push_back(now);
        self.tokens_used_today = self.tokens_used_today.saturating_add(tokens_used);
    }

    /// Check and record in one step.
    pub fn reserve(
        &mut self,
        estimated_tokens: u64,
        limits: &QuotaLimits,
        now: NaiveDateTime,
    ) -> Result<QuotaReservation, QuotaDenial> {
        self.check(estimated_tokens, limits, now)?;
        self.record(estimated_tokens, now);
        Ok(QuotaReservation {
            date: self.date,
            at: now,
            estimated_tokens,
        })
    }

    /// Replace a reservation's estimate with the tokens actually billed.
    ///
    /// The request slot stays taken. A reservation from a previous day
    /// no longer touches the counter.
    pub fn settle(&mut self, reservation: QuotaReservation, tokens_used: u64, now: NaiveDateTime) {
        self.roll_over(now.date());
        if self.date != reservation.date {
            self.tokens_used_today = self.tokens_used_today.saturating_add(tokens_used);
            return;
        }
        self.tokens_used_today = self
            .tokens_used_today
            .saturating_sub(reservation.estimated_tokens)
            .saturating_add(tokens_used);
    }

    /// Give back a reservation whose request was never sent.
    pub fn release(&mut self, reservation: QuotaReservation, now: NaiveDateTime) {
        self.roll_over(now.date());
        if self.date != reservation.date {
            return;
        }
        self.tokens_used_today = self
            .tokens_used_today
            .saturating_sub(reservation.estimated_tokens);
        if let Some(pos) = self
            .request_timestamps
            .iter()
            .rposition(|t| *t == reservation.at)
        {
            self.request_timestamps.remove(pos);
        }
    }

    /// Adopt the usage figure reported by the backend itself
    pub fn reconcile(&mut self, tokens_used: u64, now: NaiveDateTime) {
        self.roll_over(now.date());
        self.tokens_used_today = tokens_used;
    }

    pub fn snapshot(&mut self, limits: &QuotaLimits, now: NaiveDateTime) -> UsageStats {
        let can_proceed = self.check(0, limits, now).is_ok();
        let daily_limit = limits.daily_token_limit;
        let usage_percentage = if daily_limit == 0 {
            100.0
        } else {
            self.tokens_used_today as f64 / daily_limit as f64 * 100.0
        };
        UsageStats {
            date: self.date,
            tokens_used_today: self.tokens_used_today,
            daily_limit,
            remaining_tokens: daily_limit.saturating_sub(self.tokens_used_today),
            usage_percentage,
            requests_last_minute: self.request_timestamps.len(),
            can_proceed,
            persistent: true,
        }
    }
}

/// Coarse pre-call estimate: serialized messages / 4, plus the output allowance.
pub fn estimate_tokens(messages: &[Message], max_output_tokens: u32) -> u64 {
    let serialized: usize = messages
        .iter()
        .map(|m| serde_json::to_string(m).map(|s| s.len()).unwrap_or(m.content.len()))
        .sum();
    (serialized / 4) as u64 + u64::from(max_output_tokens)
}
