//! Quota ledger: daily token budget and request pacing for metered providers.
//!
//! All read-modify-write sequences happen under one lock. The dispatcher
//! uses [`QuotaLedger::try_reserve`] so the check and the recording of a
//! request are a single step: concurrent sessions cannot all pass the
//! spacing check before any of them is counted.
//!
//! Persistence is synchronous and best-effort: after the first failed write
//! the ledger keeps counting in memory and stops touching the store.

use crate::ports::clock::{Clock, SystemClock};
use crate::ports::quota_store::QuotaStore;
use consortium_domain::{QuotaDenial, QuotaLimits, QuotaRecord, QuotaReservation, UsageStats};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

struct LedgerState {
    record: QuotaRecord,
    persist: bool,
}

pub struct QuotaLedger {
    limits: QuotaLimits,
    store: Arc<dyn QuotaStore>,
    clock: Arc<dyn Clock>,
    state: Mutex<LedgerState>,
}

impl QuotaLedger {
    pub fn new(limits: QuotaLimits, store: Arc<dyn QuotaStore>) -> Self {
        Self::with_clock(limits, store, Arc::new(SystemClock))
    }

    /// Load the stored record once; a record from another day rolls over.
    pub fn with_clock(
        limits: QuotaLimits,
        store: Arc<dyn QuotaStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let today = clock.now().date();
        let stored = match store.load() {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Could not load quota record, starting from zero");
                None
            }
        };
        let record = QuotaRecord::from_stored(stored, today);
        debug!(
            tokens_used = record.tokens_used_today,
            date = %record.date,
            "Quota ledger loaded"
        );
        Self {
            limits,
            store,
            clock,
            state: Mutex::new(LedgerState {
                record,
                persist: true,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Check whether a request of `estimated_tokens` may be sent now.
    pub fn can_proceed(&self, estimated_tokens: u64) -> Result<(), QuotaDenial> {
        let now = self.clock.now();
        let mut state = self.lock();
        let rolled = state.record.roll_over(now.date());
        let result = state.record.check(estimated_tokens, &self.limits, now);
        if rolled {
            self.persist(&mut state);
        }
        result
    }

    /// Record a completed request and flush the daily counter.
    pub fn record_request(&self, tokens_used: u64) {
        let now = self.clock.now();
        let mut state = self.lock();
        state.record.record(tokens_used, now);
        info!(
            tokens_used_today = state.record.tokens_used_today,
            daily_limit = self.limits.daily_token_limit,
            "Metered request recorded"
        );
        self.persist(&mut state);
    }

    /// Check the limits and take a request slot under the same lock.
    ///
    /// The estimate counts against the budget until [`settle`](Self::settle)
    /// or [`release`](Self::release) is called.
    pub fn try_reserve(&self, estimated_tokens: u64) -> Result<QuotaReservation, QuotaDenial> {
        let now = self.clock.now();
        let mut state = self.lock();
        let rolled = state.record.roll_over(now.date());
        let result = state.record.reserve(estimated_tokens, &self.limits, now);
        if rolled {
            self.persist(&mut state);
        }
        result
    }

    /// Bill the tokens a reserved request actually used.
    ///
    /// Failed attempts settle with zero: the request slot stays spent
    /// (the backend was contacted) but the estimate is returned.
    pub fn settle(&self, reservation: QuotaReservation, tokens_used: u64) {
        let now = self.clock.now();
        let mut state = self.lock();
        state.record.settle(reservation, tokens_used, now);
        debug!(
            estimated = reservation.estimated_tokens,
            tokens_used,
            tokens_used_today = state.record.tokens_used_today,
            "Quota reservation settled"
        );
        self.persist(&mut state);
    }

    /// Return a reservation whose request was never sent.
    pub fn release(&self, reservation: QuotaReservation) {
        let now = self.clock.now();
        self.lock().record.release(reservation, now);
    }

    /// Adopt the usage the backend reported (e.g. in a 429 body).
    pub fn reconcile(&self, tokens_used: u64, reported_limit: Option<u64>) {
        let now = self.clock.now();
        let mut state = self.lock();
        if let Some(limit) = reported_limit
            && limit != self.limits.daily_token_limit
        {
            debug!(
                reported_limit = limit,
                configured_limit = self.limits.daily_token_limit,
                "Provider reports a different daily limit"
            );
        }
        state.record.reconcile(tokens_used, now);
        warn!(tokens_used, "Quota reconciled with provider-reported usage");
        self.persist(&mut state);
    }

    pub fn snapshot(&self) -> UsageStats {
        let now = self.clock.now();
        let mut state = self.lock();
        let mut stats = state.record.snapshot(&self.limits, now);
        stats.persistent = state.persist;
        stats
    }

    fn persist(&self, state: &mut LedgerState) {
        if !state.persist {
            return;
        }
        if let Err(e) = self.store.save(&state.record.to_stored()) {
            warn!(error = %e, "Could not persist quota record, continuing in memory only");
            state.persist = false;
        }
    }
}
