//! Explicit dependency container built once at process start.
//!
//! Holds the shared dispatcher (and through it the quota ledger and the
//! per-provider circuits) plus the immutable roster and bounds. Front ends
//! build one context and derive use cases from it.

use crate::config::ConversationBounds;
use crate::dispatch::ProviderDispatcher;
use crate::ports::conversation_logger::{ConversationLogger, NoConversationLogger};
use crate::use_cases::run_conversation::RunConversationUseCase;
use consortium_domain::AdvisorRoster;
use std::sync::Arc;

pub struct ConsortiumContext {
    dispatcher: Arc<ProviderDispatcher>,
    roster: AdvisorRoster,
    bounds: ConversationBounds,
    logger: Arc<dyn ConversationLogger>,
}

impl ConsortiumContext {
    pub fn new(
        dispatcher: Arc<ProviderDispatcher>,
        roster: AdvisorRoster,
        bounds: ConversationBounds,
    ) -> Self {
        Self {
            dispatcher,
            roster,
            bounds,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn conversation_use_case(&self) -> RunConversationUseCase<ProviderDispatcher> {
        RunConversationUseCase::new(Arc::clone(&self.dispatcher), self.roster.clone())
            .with_bounds(self.bounds)
            .with_logger(Arc::clone(&self.logger))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DispatchSettings;
    use crate::dispatch::QuotaLedger;
    use crate::ports::quota_store::InMemoryQuotaStore;
    use crate::use_cases::run_conversation::RunConversationInput;
    use consortium_domain::{AdvisorSelection, QuotaLimits};

    #[tokio::test]
    async fn test_offline_context_runs_end_to_end() {
        let ledger = Arc::new(QuotaLedger::new(
            QuotaLimits::default(),
            Arc::new(InMemoryQuotaStore::new()),
        ));
        let dispatcher = Arc::new(ProviderDispatcher::new(
            vec![],
            ledger,
            DispatchSettings::offline(),
        ));
        let ctx = ConsortiumContext::new(
            dispatcher,
            AdvisorRoster::builtin(),
            ConversationBounds::default(),
        );

        let outcome = ctx
            .conversation_use_case()
            .execute(RunConversationInput::new(
                "Build a marketplace app for handmade goods",
                AdvisorSelection::defaults(),
                2,
            ))
            .await
            .unwrap();

        // brief + 3 advisors x 2 rounds + report
        assert_eq!(outcome.transcript.len(), 8);
        assert!(outcome.report.contains("Marketplace / Retail"));
    }
}
