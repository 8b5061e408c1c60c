//! Provider dispatcher: priority-ordered fallback over completion providers.
//!
//! For each request the dispatcher walks its providers in priority order,
//! skipping inactive, disabled, over-quota or rate-limited ones, and returns
//! the first successful completion. Metered providers are admitted through a
//! ledger reservation taken before the call and settled after it. Timeouts advance a per-provider circuit
//! breaker; any other failure only skips the provider for this call. When
//! nothing succeeds the offline fallback answers, so dispatch never fails.

use super::ledger::QuotaLedger;
use super::rate_limiter::RateLimiter;
use crate::config::DispatchSettings;
use crate::ports::completion_provider::{Completion, CompletionProvider, ProviderError};
use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use async_trait::async_trait;
use consortium_domain::{
    AdvisorId, CircuitState, Message, OfflineFallback, ProviderHealth, ProviderId,
    QuotaReservation, Role, SamplingParams, UsageStats, estimate_tokens,
};
use futures::future::join_all;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Observable state of one provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderStatus {
    pub id: ProviderId,
    pub display_name: String,
    pub model: String,
    pub active: bool,
    pub health: ProviderHealth,
    pub consecutive_timeouts: u32,
    pub requests_per_minute_limit: Option<u32>,
    /// Permits left in the per-minute bucket, when the provider has one
    pub permits_available: Option<u32>,
    pub metered: bool,
}

struct ProviderSlot {
    provider: Arc<dyn CompletionProvider>,
    active: AtomicBool,
    circuit: Mutex<CircuitState>,
    limiter: Option<Mutex<RateLimiter>>,
}

impl ProviderSlot {
    fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        let config = provider.config();
        let active = config.active;
        let limiter = config
            .requests_per_minute_limit
            .map(|rpm| Mutex::new(RateLimiter::per_minute(rpm)));
        Self {
            active: AtomicBool::new(active),
            circuit: Mutex::new(CircuitState::default()),
            limiter,
            provider,
        }
    }

    fn id(&self) -> ProviderId {
        self.provider.config().id
    }

    fn timeout(&self) -> Duration {
        self.provider.config().timeout
    }

    fn circuit(&self) -> MutexGuard<'_, CircuitState> {
        self.circuit
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn limiter(&self) -> Option<MutexGuard<'_, RateLimiter>> {
        self.limiter
            .as_ref()
            .map(|l| l.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }

    fn try_acquire_permit(&self) -> bool {
        self.limiter().is_none_or(|mut limiter| limiter.try_acquire())
    }
}

/// Why a provider was passed over without being called
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    Inactive,
    Disabled,
    RateLimited,
    OverQuota,
}

pub struct ProviderDispatcher {
    slots: Vec<ProviderSlot>,
    ledger: Arc<QuotaLedger>,
    fallback: OfflineFallback,
    settings: DispatchSettings,
}

impl ProviderDispatcher {
    /// `providers` must already be in priority order.
    pub fn new(
        providers: Vec<Arc<dyn CompletionProvider>>,
        ledger: Arc<QuotaLedger>,
        settings: DispatchSettings,
    ) -> Self {
        let slots: Vec<ProviderSlot> = providers.into_iter().map(ProviderSlot::new).collect();
        info!(
            providers = ?slots.iter().map(|s| s.id().as_str()).collect::<Vec<_>>(),
            offline = settings.offline,
            "Provider dispatcher ready"
        );
        Self {
            slots,
            ledger,
            fallback: OfflineFallback,
            settings,
        }
    }

    /// Obtain completion text for one advisor turn. Never fails.
    pub async fn dispatch(
        &self,
        messages: &[Message],
        advisor: AdvisorId,
        sampling: SamplingParams,
    ) -> String {
        if self.settings.offline {
            debug!(advisor = %advisor, "Offline mode, using fallback");
            return self.fallback_for(messages, advisor);
        }

        let estimate = estimate_tokens(messages, sampling.max_tokens);

        for slot in &self.slots {
            let id = slot.id();
            let reservation = match self.admit(slot, estimate) {
                Ok(reservation) => reservation,
                Err(reason) => {
                    debug!(provider = %id, ?reason, "Skipping provider");
                    continue;
                }
            };

            let result = self.attempt(slot, messages, sampling).await;
            if let Some(reservation) = reservation {
                let billed = match &result {
                    Ok(completion) => completion.tokens_used.unwrap_or(estimate),
                    Err(_) => 0,
                };
                self.ledger.settle(reservation, billed);
            }

            match result {
                Ok(completion) => {
                    slot.circuit().record_success();
                    info!(provider = %id, advisor = %advisor, "Completion received");
                    return completion.text;
                }
                Err(ProviderError::Timeout) => {
                    let health = slot.circuit().record_timeout(self.settings.circuit_threshold);
                    warn!(provider = %id, advisor = %advisor, %health, "Provider timed out");
                }
                Err(ProviderError::RateLimited { used, limit }) => {
                    warn!(provider = %id, ?used, ?limit, "Provider reported rate limit");
                    if reservation.is_some()
                        && let Some(used) = used
                    {
                        self.ledger.reconcile(used, limit);
                    }
                }
                Err(e) => {
                    warn!(provider = %id, advisor = %advisor, error = %e, "Provider call failed");
                }
            }
        }

        info!(advisor = %advisor, "No provider succeeded, using offline fallback");
        self.fallback_for(messages, advisor)
    }

    /// Decide whether a provider may be called now.
    ///
    /// Metered providers get a ledger reservation, taken before the bucket
    /// permit and given back if the bucket is empty.
    fn admit(
        &self,
        slot: &ProviderSlot,
        estimate: u64,
    ) -> Result<Option<QuotaReservation>, SkipReason> {
        if !slot.active.load(Ordering::SeqCst) {
            return Err(SkipReason::Inactive);
        }
        if slot.circuit().is_disabled() {
            return Err(SkipReason::Disabled);
        }
        let reservation = if slot.provider.config().metered {
            match self.ledger.try_reserve(estimate) {
                Ok(reservation) => Some(reservation),
                Err(denial) => {
                    debug!(provider = %slot.id(), %denial, "Quota check refused");
                    return Err(SkipReason::OverQuota);
                }
            }
        } else {
            None
        };
        if !slot.try_acquire_permit() {
            if let Some(reservation) = reservation {
                self.ledger.release(reservation);
            }
            return Err(SkipReason::RateLimited);
        }
        Ok(reservation)
    }

    /// One bounded call. On timeout the pending future is dropped.
    async fn attempt(
        &self,
        slot: &ProviderSlot,
        messages: &[Message],
        sampling: SamplingParams,
    ) -> Result<Completion, ProviderError> {
        let call = slot.provider.complete(messages, sampling);
        let completion = match tokio::time::timeout(slot.timeout(), call).await {
            Ok(result) => result?,
            Err(_) => return Err(ProviderError::Timeout),
        };
        if completion.text.trim().is_empty() {
            return Err(ProviderError::MalformedResponse(
                "empty completion text".to_string(),
            ));
        }
        Ok(completion)
    }

    /// Fallback keyed on the project brief (the first user message).
    fn fallback_for(&self, messages: &[Message], advisor: AdvisorId) -> String {
        let project_text = messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        self.fallback.respond(project_text, advisor)
    }

    pub fn status(&self) -> Vec<ProviderStatus> {
        self.slots
            .iter()
            .map(|slot| {
                let config = slot.provider.config();
                let circuit = *slot.circuit();
                ProviderStatus {
                    id: config.id,
                    display_name: config.display_name.clone(),
                    model: config.model_id.clone(),
                    active: slot.active.load(Ordering::SeqCst),
                    health: circuit.health(),
                    consecutive_timeouts: circuit.consecutive_timeouts,
                    requests_per_minute_limit: config.requests_per_minute_limit,
                    permits_available: slot.limiter().map(|mut l| l.available()),
                    metered: config.metered,
                }
            })
            .collect()
    }

    pub fn quota_snapshot(&self) -> UsageStats {
        self.ledger.snapshot()
    }

    /// Re-enable one provider; returns false if it is not configured.
    pub fn reset_circuit(&self, id: ProviderId) -> bool {
        match self.slots.iter().find(|s| s.id() == id) {
            Some(slot) => {
                slot.circuit().reset();
                info!(provider = %id, "Circuit reset");
                true
            }
            None => false,
        }
    }

    pub fn reset_all_circuits(&self) {
        for slot in &self.slots {
            slot.circuit().reset();
        }
        info!("All circuits reset");
    }

    /// Recompute `active` for every provider through its liveness probe.
    pub async fn refresh_liveness(&self) {
        let results = join_all(self.slots.iter().map(|slot| slot.provider.probe())).await;
        for (slot, live) in self.slots.iter().zip(results) {
            let was = slot.active.swap(live, Ordering::SeqCst);
            if was != live {
                info!(provider = %slot.id(), active = live, "Provider liveness changed");
            }
        }
    }
}

#[async_trait]
impl LlmGateway for ProviderDispatcher {
    async fn complete(&self, request: CompletionRequest) -> String {
        self.dispatch(&request.messages, request.advisor, request.sampling)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clock::Clock;
    use crate::ports::quota_store::InMemoryQuotaStore;
    use chrono::{NaiveDate, NaiveDateTime};
    use consortium_domain::{ProviderConfig, QuotaLimits};
    use std::sync::atomic::AtomicUsize;

    // ==================== Test Stubs ====================

    #[derive(Clone, Copy)]
    enum Behavior {
        Succeed,
        Slow,
        Hang,
        TimeoutError,
        Malformed,
        RateLimited(u64),
        Empty,
    }

    struct StubProvider {
        config: ProviderConfig,
        behavior: Behavior,
        calls: AtomicUsize,
        live: bool,
    }

    impl StubProvider {
        fn new(id: ProviderId, behavior: Behavior) -> Arc<Self> {
            let config = ProviderConfig {
                timeout: Duration::from_millis(50),
                requests_per_minute_limit: None,
                metered: false,
                ..ProviderConfig::builtin(id).with_active(true)
            };
            Arc::new(Self {
                config,
                behavior,
                calls: AtomicUsize::new(0),
                live: true,
            })
        }

        fn with_config(config: ProviderConfig, behavior: Behavior, live: bool) -> Arc<Self> {
            Arc::new(Self {
                config,
                behavior,
                calls: AtomicUsize::new(0),
                live,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionProvider for StubProvider {
        fn config(&self) -> &ProviderConfig {
            &self.config
        }

        async fn complete(
            &self,
            _messages: &[Message],
            _sampling: SamplingParams,
        ) -> Result<Completion, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Succeed => {
                    Ok(Completion::new(format!("from {}", self.config.id)).with_tokens(42))
                }
                Behavior::Slow => {
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    Ok(Completion::new(format!("from {}", self.config.id)).with_tokens(42))
                }
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(Completion::new("too late"))
                }
                Behavior::TimeoutError => Err(ProviderError::Timeout),
                Behavior::Malformed => Err(ProviderError::MalformedResponse("no choices".into())),
                Behavior::RateLimited(used) => Err(ProviderError::RateLimited {
                    used: Some(used),
                    limit: Some(1000),
                }),
                Behavior::Empty => Ok(Completion::new("   ")),
            }
        }

        async fn probe(&self) -> bool {
            self.live
        }
    }

    struct FixedClock(NaiveDateTime);

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    fn ledger() -> Arc<QuotaLedger> {
        ledger_with(QuotaLimits::default())
    }

    fn ledger_with(limits: QuotaLimits) -> Arc<QuotaLedger> {
        let now = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Arc::new(QuotaLedger::with_clock(
            limits,
            Arc::new(InMemoryQuotaStore::new()),
            Arc::new(FixedClock(now)),
        ))
    }

    fn dispatcher(providers: Vec<Arc<dyn CompletionProvider>>) -> ProviderDispatcher {
        ProviderDispatcher::new(providers, ledger(), DispatchSettings::default())
    }

    fn messages() -> Vec<Message> {
        vec![
            Message::system("You are a product manager."),
            Message::user("Build a marketplace app for handmade goods"),
            Message::user("Current context"),
        ]
    }

    fn sampling() -> SamplingParams {
        SamplingParams::new(0.7, 200)
    }

    // ==================== Failover ====================

    #[tokio::test]
    async fn test_failover_returns_third_provider() {
        let first = StubProvider::new(ProviderId::Ollama, Behavior::Malformed);
        let second = StubProvider::new(ProviderId::Together, Behavior::TimeoutError);
        let third = StubProvider::new(ProviderId::Groq, Behavior::Succeed);
        let d = dispatcher(vec![first.clone(), second.clone(), third.clone()]);

        let text = d
            .dispatch(&messages(), AdvisorId::ProductManager, sampling())
            .await;

        assert_eq!(text, "from groq");
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
        assert_eq!(third.calls(), 1);
    }

    // ==================== Circuit breaker ====================

    #[tokio::test(start_paused = true)]
    async fn test_circuit_opens_after_three_timeouts() {
        let hanging = StubProvider::new(ProviderId::Ollama, Behavior::Hang);
        let backup = StubProvider::new(ProviderId::Cohere, Behavior::Succeed);
        let d = dispatcher(vec![hanging.clone(), backup.clone()]);

        for _ in 0..3 {
            let text = d
                .dispatch(&messages(), AdvisorId::ProductManager, sampling())
                .await;
            assert_eq!(text, "from cohere");
        }
        assert_eq!(hanging.calls(), 3);
        assert_eq!(d.status()[0].health, ProviderHealth::Disabled);

        for _ in 0..5 {
            d.dispatch(&messages(), AdvisorId::ProductManager, sampling())
                .await;
        }
        assert_eq!(hanging.calls(), 3);
        assert_eq!(backup.calls(), 8);
    }

    #[tokio::test]
    async fn test_non_timeout_errors_leave_circuit_untouched() {
        let broken = StubProvider::new(ProviderId::Ollama, Behavior::Malformed);
        let d = dispatcher(vec![broken.clone()]);

        for _ in 0..5 {
            d.dispatch(&messages(), AdvisorId::BusinessAnalyst, sampling())
                .await;
        }
        assert_eq!(broken.calls(), 5);
        let status = &d.status()[0];
        assert_eq!(status.health, ProviderHealth::Active);
        assert_eq!(status.consecutive_timeouts, 0);
    }

    #[tokio::test]
    async fn test_reset_circuit_re_enables_provider() {
        let flaky = StubProvider::new(ProviderId::Groq, Behavior::TimeoutError);
        let d = dispatcher(vec![flaky.clone()]);
        for _ in 0..3 {
            d.dispatch(&messages(), AdvisorId::ProductManager, sampling())
                .await;
        }
        assert_eq!(d.status()[0].health, ProviderHealth::Disabled);

        assert!(d.reset_circuit(ProviderId::Groq));
        assert!(!d.reset_circuit(ProviderId::Cohere));
        assert_eq!(d.status()[0].health, ProviderHealth::Active);

        d.dispatch(&messages(), AdvisorId::ProductManager, sampling())
            .await;
        assert_eq!(flaky.calls(), 4);
    }

    // ==================== Fallback ====================

    #[tokio::test]
    async fn test_all_failures_use_offline_fallback() {
        let d = dispatcher(vec![
            StubProvider::new(ProviderId::Ollama, Behavior::Malformed),
            StubProvider::new(ProviderId::Together, Behavior::Empty),
        ]);

        let text = d
            .dispatch(&messages(), AdvisorId::SecurityExpert, sampling())
            .await;
        let expected = OfflineFallback.respond(
            "Build a marketplace app for handmade goods",
            AdvisorId::SecurityExpert,
        );
        assert_eq!(text, expected);
    }

    #[tokio::test]
    async fn test_offline_mode_skips_network() {
        let provider = StubProvider::new(ProviderId::Ollama, Behavior::Succeed);
        let d = ProviderDispatcher::new(
            vec![provider.clone()],
            ledger(),
            DispatchSettings::offline(),
        );

        let text = d
            .dispatch(&messages(), AdvisorId::ProductManager, sampling())
            .await;
        assert!(text.starts_with("💡 **Product Manager Analysis:**"));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_inactive_provider_is_skipped() {
        let config = ProviderConfig::builtin(ProviderId::Together).with_active(false);
        let inactive = StubProvider::with_config(config, Behavior::Succeed, true);
        let d = dispatcher(vec![inactive.clone()]);

        d.dispatch(&messages(), AdvisorId::ProductManager, sampling())
            .await;
        assert_eq!(inactive.calls(), 0);

        d.refresh_liveness().await;
        assert!(d.status()[0].active);
    }

    // ==================== Quota ====================

    #[tokio::test]
    async fn test_metered_success_is_recorded() {
        let config = ProviderConfig {
            metered: true,
            requests_per_minute_limit: None,
            ..ProviderConfig::builtin(ProviderId::Groq).with_active(true)
        };
        let groq = StubProvider::with_config(config, Behavior::Succeed, true);
        let d = dispatcher(vec![groq]);

        d.dispatch(&messages(), AdvisorId::ProductManager, sampling())
            .await;
        assert_eq!(d.quota_snapshot().tokens_used_today, 42);
    }

    #[tokio::test]
    async fn test_over_quota_metered_provider_is_skipped() {
        let limits = QuotaLimits {
            daily_token_limit: 100,
            ..QuotaLimits::default()
        };
        let config = ProviderConfig {
            metered: true,
            ..ProviderConfig::builtin(ProviderId::Groq).with_active(true)
        };
        let groq = StubProvider::with_config(config, Behavior::Succeed, true);
        let local = StubProvider::new(ProviderId::Ollama, Behavior::Succeed);
        let d = ProviderDispatcher::new(
            vec![groq.clone(), local.clone()],
            ledger_with(limits),
            DispatchSettings::default(),
        );

        let text = d
            .dispatch(&messages(), AdvisorId::ProductManager, sampling())
            .await;
        assert_eq!(text, "from ollama");
        assert_eq!(groq.calls(), 0);
    }

    #[tokio::test]
    async fn test_rate_limited_response_reconciles_ledger() {
        let config = ProviderConfig {
            metered: true,
            ..ProviderConfig::builtin(ProviderId::Groq).with_active(true)
        };
        let groq = StubProvider::with_config(config, Behavior::RateLimited(77_000), true);
        let d = dispatcher(vec![groq.clone()]);

        d.dispatch(&messages(), AdvisorId::ProductManager, sampling())
            .await;
        assert_eq!(groq.calls(), 1);
        assert_eq!(d.quota_snapshot().tokens_used_today, 77_000);
    }

    #[tokio::test]
    async fn test_requests_per_minute_bucket_skips_provider() {
        let config = ProviderConfig {
            requests_per_minute_limit: Some(1),
            metered: false,
            ..ProviderConfig::builtin(ProviderId::Cohere).with_active(true)
        };
        let cohere = StubProvider::with_config(config, Behavior::Succeed, true);
        let d = dispatcher(vec![cohere.clone()]);

        let first = d
            .dispatch(&messages(), AdvisorId::ProductManager, sampling())
            .await;
        let second = d
            .dispatch(&messages(), AdvisorId::ProductManager, sampling())
            .await;
        assert_eq!(first, "from cohere");
        assert!(second.starts_with("💡"));
        assert_eq!(cohere.calls(), 1);
        assert_eq!(d.status()[0].permits_available, Some(0));
    }

    #[tokio::test]
    async fn test_concurrent_sessions_share_quota_spacing() {
        let config = ProviderConfig {
            metered: true,
            requests_per_minute_limit: None,
            ..ProviderConfig::builtin(ProviderId::Groq).with_active(true)
        };
        let groq = StubProvider::with_config(config, Behavior::Slow, true);
        let d = dispatcher(vec![groq.clone()]);
        let msgs = messages();

        let texts = join_all(
            (0..5).map(|_| d.dispatch(&msgs, AdvisorId::ProductManager, sampling())),
        )
        .await;

        // only the first session got through the minimum spacing
        assert_eq!(groq.calls(), 1);
        assert_eq!(texts.iter().filter(|t| t.as_str() == "from groq").count(), 1);
        let stats = d.quota_snapshot();
        assert_eq!(stats.requests_last_minute, 1);
        assert_eq!(stats.tokens_used_today, 42);
    }

    #[tokio::test]
    async fn test_bucket_refusal_releases_quota_reservation() {
        let limits = QuotaLimits {
            min_request_interval: Duration::ZERO,
            ..QuotaLimits::default()
        };
        let config = ProviderConfig {
            metered: true,
            requests_per_minute_limit: Some(1),
            ..ProviderConfig::builtin(ProviderId::Groq).with_active(true)
        };
        let groq = StubProvider::with_config(config, Behavior::Succeed, true);
        let d = ProviderDispatcher::new(
            vec![groq.clone()],
            ledger_with(limits),
            DispatchSettings::default(),
        );

        d.dispatch(&messages(), AdvisorId::ProductManager, sampling())
            .await;
        d.dispatch(&messages(), AdvisorId::ProductManager, sampling())
            .await;

        assert_eq!(groq.calls(), 1);
        let stats = d.quota_snapshot();
        assert_eq!(stats.requests_last_minute, 1);
        assert_eq!(stats.tokens_used_today, 42);
    }

    #[tokio::test]
    async fn test_failed_metered_attempt_bills_nothing() {
        let config = ProviderConfig {
            metered: true,
            ..ProviderConfig::builtin(ProviderId::Together).with_active(true)
        };
        let together = StubProvider::with_config(config, Behavior::Malformed, true);
        let d = dispatcher(vec![together.clone()]);

        d.dispatch(&messages(), AdvisorId::ProductManager, sampling())
            .await;
        let stats = d.quota_snapshot();
        assert_eq!(together.calls(), 1);
        assert_eq!(stats.tokens_used_today, 0);
        assert_eq!(stats.requests_last_minute, 1);
    }
}
