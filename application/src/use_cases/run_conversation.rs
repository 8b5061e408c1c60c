//! Run Conversation use case
//!
//! Orchestrates one consultation: every enabled advisor speaks once per
//! round in canonical order, each turn feeding the next, and a synthesizer
//! closes with a report in the requested style.

use crate::advisor::Advisor;
use crate::config::ConversationBounds;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use consortium_domain::{
    AdvisorId, AdvisorRoster, AdvisorSelection, AdvisorSpec, ConversationOutcome,
    ConversationState, DomainError, ProjectBrief, ReportStyle, ReportTemplate,
};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur before a conversation starts.
///
/// Once the first round begins nothing is surfaced: provider failures are
/// absorbed by the gateway.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunConversationError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),
}

/// Input for the RunConversation use case
#[derive(Debug, Clone)]
pub struct RunConversationInput {
    pub brief: String,
    pub advisors: AdvisorSelection,
    pub rounds: usize,
    pub report_style: ReportStyle,
}

impl RunConversationInput {
    pub fn new(brief: impl Into<String>, advisors: AdvisorSelection, rounds: usize) -> Self {
        Self {
            brief: brief.into(),
            advisors,
            rounds,
            report_style: ReportStyle::default(),
        }
    }

    pub fn with_report_style(mut self, style: ReportStyle) -> Self {
        self.report_style = style;
        self
    }

    /// Build from the loosely typed request a front end sends:
    /// advisor names mapped to enabled flags and a report style name.
    pub fn from_request(
        brief: impl Into<String>,
        selected: &HashMap<String, bool>,
        rounds: usize,
        report_style: &str,
    ) -> Result<Self, RunConversationError> {
        let advisors =
            AdvisorSelection::from_names(selected.iter().map(|(k, v)| (k.as_str(), *v)))?;
        let style = report_style.parse::<ReportStyle>()?;
        Ok(Self::new(brief, advisors, rounds).with_report_style(style))
    }
}

/// Use case for running an advisor conversation
pub struct RunConversationUseCase<G: LlmGateway + ?Sized + 'static> {
    gateway: Arc<G>,
    roster: AdvisorRoster,
    bounds: ConversationBounds,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + ?Sized + 'static> RunConversationUseCase<G> {
    pub fn new(gateway: Arc<G>, roster: AdvisorRoster) -> Self {
        Self {
            gateway,
            roster,
            bounds: ConversationBounds::default(),
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_bounds(mut self, bounds: ConversationBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunConversationInput,
    ) -> Result<ConversationOutcome, RunConversationError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunConversationInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<ConversationOutcome, RunConversationError> {
        let (brief, rounds, specs) = self.validate(&input)?;
        let advisor_ids: Vec<AdvisorId> = specs.iter().map(|s| s.id).collect();

        info!(
            advisors = ?advisor_ids,
            rounds,
            style = %input.report_style,
            "Starting conversation"
        );
        self.logger.log(ConversationEvent::started(
            brief.content(),
            &advisor_ids,
            rounds,
            input.report_style,
        ));
        progress.on_conversation_start(&advisor_ids, rounds);

        let advisors: Vec<Advisor<G>> = specs
            .into_iter()
            .map(|spec| Advisor::new(spec, Arc::clone(&self.gateway)))
            .collect();

        let mut state = ConversationState::start(brief.content());
        let mut context = brief.content().to_string();

        for round in 1..=rounds {
            progress.on_round_start(round, rounds);
            context = self
                .run_round(round, &advisors, &mut state, context, progress)
                .await;
            progress.on_round_complete(round);
        }

        // Lead if enabled, else the first enabled advisor in canonical order.
        // `validate` guarantees at least one advisor.
        let synthesizer = advisors
            .iter()
            .find(|a| a.id().is_lead())
            .or_else(|| advisors.first())
            .ok_or(DomainError::NoAdvisors)?;

        info!(synthesizer = %synthesizer.id(), "Requesting final report");
        progress.on_report_start(synthesizer.id());
        let report = synthesizer
            .respond(
                ReportTemplate::instruction(input.report_style),
                state.api_history(),
            )
            .await;
        state.record_report(synthesizer.label(), report.clone());
        self.logger.log(ConversationEvent::final_report(
            synthesizer.id(),
            input.report_style,
            &report,
        ));
        progress.on_report_complete();

        debug_assert!(state.is_consistent());

        Ok(ConversationOutcome {
            header: ReportTemplate::team_header(
                brief.content(),
                &advisor_ids,
                input.report_style,
                rounds,
            ),
            transcript: state.into_display_history(),
            report,
            synthesizer: synthesizer.id(),
            report_style: input.report_style,
            rounds,
            advisors: advisor_ids,
        })
    }

    fn validate(
        &self,
        input: &RunConversationInput,
    ) -> Result<(ProjectBrief, usize, Vec<AdvisorSpec>), RunConversationError> {
        let brief = ProjectBrief::try_new(input.brief.as_str())?;
        let rounds = self.bounds.check(input.rounds)?;
        let specs = self.roster.resolve(&input.advisors);
        if specs.is_empty() {
            return Err(DomainError::NoAdvisors.into());
        }
        Ok((brief, rounds, specs))
    }

    /// One pass over all advisors. Returns the context for the next round.
    async fn run_round(
        &self,
        round: usize,
        advisors: &[Advisor<G>],
        state: &mut ConversationState,
        mut context: String,
        progress: &dyn ProgressNotifier,
    ) -> String {
        let mut outputs: Vec<String> = Vec::with_capacity(advisors.len());

        for advisor in advisors {
            progress.on_advisor_start(advisor.id(), round);
            let output = advisor.respond(&context, state.api_history()).await;
            state.record_turn(advisor.label(), round, output.clone());

            self.logger.log(ConversationEvent::advisor_turn(round, advisor.id(), &output));
            debug!(advisor = %advisor.id(), round, bytes = output.len(), "Advisor turn recorded");
            progress.on_advisor_complete(advisor.id(), round);

            if advisor.id().carries_context() {
                context = output.clone();
            }
            outputs.push(output);
        }

        if outputs.is_empty() {
            return context;
        }
        let synthesis = ReportTemplate::round_synthesis(round, &outputs);
        self.logger.log(ConversationEvent::round_synthesis(round, &synthesis));
        synthesis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::conversation_logger::ConversationEventKind;
    use crate::ports::llm_gateway::CompletionRequest;
    use async_trait::async_trait;
    use consortium_domain::{Message, OfflineFallback, Role};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== Test Stubs ====================

    /// Deterministic gateway: echoes the advisor and the last user message.
    struct EchoGateway {
        calls: AtomicUsize,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl EchoGateway {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn last_user_message(request: &CompletionRequest) -> String {
            request
                .messages
                .iter()
                .rev()
                .find(|m| m.role == Role::User)
                .map(|m| m.content.clone())
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl LlmGateway for EchoGateway {
        async fn complete(&self, request: CompletionRequest) -> String {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = format!(
                "[{}#{}] re: {}",
                request.advisor.as_str(),
                n,
                Self::last_user_message(&request).chars().take(40).collect::<String>()
            );
            self.requests.lock().unwrap().push(request);
            reply
        }
    }

    /// Gateway that always answers from the offline fallback
    struct FallbackGateway;

    #[async_trait]
    impl LlmGateway for FallbackGateway {
        async fn complete(&self, request: CompletionRequest) -> String {
            let brief = request
                .messages
                .iter()
                .find(|m| m.role == Role::User)
                .map(|m| m.content.as_str())
                .unwrap_or_default();
            OfflineFallback.respond(brief, request.advisor)
        }
    }

    struct RecordingLogger {
        events: Mutex<Vec<ConversationEventKind>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event.kind);
        }
    }

    fn use_case<G: LlmGateway + 'static>(gateway: Arc<G>) -> RunConversationUseCase<G> {
        RunConversationUseCase::new(gateway, AdvisorRoster::builtin())
    }

    fn assistant_labels(transcript: &[Message]) -> Vec<&str> {
        transcript
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .filter_map(|m| m.agent_label.as_deref())
            .collect()
    }

    // ==================== Validation ====================

    #[tokio::test]
    async fn test_rejects_empty_selection() {
        let uc = use_case(EchoGateway::new());
        let input = RunConversationInput::new("A brief", AdvisorSelection::default(), 1);
        assert_eq!(
            uc.execute(input).await.unwrap_err(),
            RunConversationError::InvalidInput(DomainError::NoAdvisors)
        );
    }

    #[tokio::test]
    async fn test_rejects_blank_brief_and_bad_rounds() {
        let uc = use_case(EchoGateway::new());
        let blank = RunConversationInput::new("   ", AdvisorSelection::defaults(), 1);
        assert!(uc.execute(blank).await.is_err());

        let zero = RunConversationInput::new("brief", AdvisorSelection::defaults(), 0);
        assert!(matches!(
            uc.execute(zero).await,
            Err(RunConversationError::InvalidInput(DomainError::InvalidRounds { .. }))
        ));
    }

    #[tokio::test]
    async fn test_disabled_roster_entry_counts_as_not_selected() {
        let roster = AdvisorRoster::from_entries([consortium_domain::RosterEntry::Available(
            AdvisorSpec::builtin(AdvisorId::SoftwareEngineer),
        )]);
        let uc = RunConversationUseCase::new(EchoGateway::new(), roster);
        let input = RunConversationInput::new(
            "brief",
            AdvisorSelection::only([AdvisorId::ProductManager]),
            1,
        );
        assert!(uc.execute(input).await.is_err());
    }

    // ==================== Scenario ====================

    #[tokio::test]
    async fn test_marketplace_scenario_lead_only() {
        let gateway = EchoGateway::new();
        let uc = use_case(gateway.clone());
        let mut selected = HashMap::new();
        selected.insert("pm".to_string(), true);
        selected.insert("engineer".to_string(), false);
        let input = RunConversationInput::from_request(
            "Build a marketplace app for handmade goods",
            &selected,
            1,
            "executive_summary",
        )
        .unwrap();

        let outcome = uc.execute(input).await.unwrap();

        assert_eq!(
            assistant_labels(&outcome.transcript),
            vec!["Product Manager", "Product Manager"]
        );
        assert_eq!(outcome.transcript[0].role, Role::User);
        assert!(!outcome.report.trim().is_empty());
        assert_eq!(outcome.synthesizer, AdvisorId::ProductManager);
        // one turn plus the report
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_single_advisor_talks_to_itself_for_all_rounds() {
        let gateway = EchoGateway::new();
        let uc = use_case(gateway.clone());
        let input = RunConversationInput::new(
            "A budgeting tool",
            AdvisorSelection::only([AdvisorId::FinancialAnalyst]),
            3,
        );

        let outcome = uc.execute(input).await.unwrap();
        let label = AdvisorId::FinancialAnalyst.label();
        let turns: Vec<_> = outcome
            .transcript
            .iter()
            .filter(|m| m.agent_label.as_deref() == Some(label))
            .collect();
        // three rounds plus the report
        assert_eq!(turns.len(), 4);
        assert_eq!(outcome.synthesizer, AdvisorId::FinancialAnalyst);
        assert_eq!(turns[2].round, Some(3));
    }

    // ==================== Ordering and context ====================

    #[tokio::test]
    async fn test_canonical_order_regardless_of_selection_order() {
        let gateway = EchoGateway::new();
        let uc = use_case(gateway.clone());
        let selection = AdvisorSelection::only([
            AdvisorId::SecurityExpert,
            AdvisorId::UxDesigner,
            AdvisorId::ProductManager,
        ]);
        let outcome = uc
            .execute(RunConversationInput::new("brief", selection, 1))
            .await
            .unwrap();

        assert_eq!(
            assistant_labels(&outcome.transcript),
            vec![
                "Product Manager",
                "UX Designer",
                "Security Expert",
                "Product Manager"
            ]
        );
    }

    #[tokio::test]
    async fn test_context_carriers_redirect_context_and_rounds_start_from_synthesis() {
        let gateway = EchoGateway::new();
        let uc = use_case(gateway.clone());
        let selection = AdvisorSelection::only([
            AdvisorId::ProductManager,
            AdvisorId::UxDesigner,
            AdvisorId::LegalCompliance,
        ]);
        uc.execute(RunConversationInput::new("the brief", selection, 2))
            .await
            .unwrap();

        let requests = gateway.requests.lock().unwrap();
        let last_user = |i: usize| EchoGateway::last_user_message(&requests[i]);

        // Round 1: PM sees the brief, UX sees PM's output (PM carries context),
        // Legal still sees PM's output (UX does not carry context).
        assert_eq!(last_user(0), "the brief");
        assert!(last_user(1).starts_with("[product_manager#0]"));
        assert!(last_user(2).starts_with("[product_manager#0]"));
        // Round 2 starts from the round-1 synthesis of the first two outputs
        assert!(last_user(3).starts_with("Round 1 synthesis: [product_manager#0]"));
        assert!(last_user(3).contains(" | [ux_designer#1]"));
    }

    #[tokio::test]
    async fn test_api_history_grows_with_every_turn() {
        let gateway = EchoGateway::new();
        let uc = use_case(gateway.clone());
        uc.execute(RunConversationInput::new(
            "brief",
            AdvisorSelection::only([AdvisorId::ProductManager, AdvisorId::BusinessAnalyst]),
            2,
        ))
        .await
        .unwrap();

        let requests = gateway.requests.lock().unwrap();
        // system + history + user context; history grows by one per turn
        let lens: Vec<usize> = requests.iter().map(|r| r.messages.len()).collect();
        assert_eq!(lens, vec![3, 4, 5, 6, 7]);
        // provider-facing history never carries display metadata
        assert!(
            requests
                .iter()
                .flat_map(|r| r.messages.iter())
                .all(|m| m.agent_label.is_none() && m.round.is_none())
        );
    }

    #[tokio::test]
    async fn test_replay_is_byte_identical() {
        let run = || async {
            let uc = use_case(EchoGateway::new());
            uc.execute(RunConversationInput::new(
                "A fitness tracker",
                AdvisorSelection::defaults(),
                2,
            ))
            .await
            .unwrap()
        };
        let a = run().await;
        let b = run().await;
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    // ==================== Degraded operation ====================

    #[tokio::test]
    async fn test_every_valid_input_yields_transcript_and_report() {
        let uc = use_case(Arc::new(FallbackGateway));
        for style in ReportStyle::ALL {
            for rounds in 1..=3 {
                for id in AdvisorId::ALL {
                    let outcome = uc
                        .execute(
                            RunConversationInput::new(
                                "Neobank for students",
                                AdvisorSelection::only([id]),
                                rounds,
                            )
                            .with_report_style(style),
                        )
                        .await
                        .unwrap();
                    assert!(outcome.transcript.len() > 1);
                    assert!(!outcome.report.is_empty());
                }
            }
        }
    }

    #[tokio::test]
    async fn test_logs_conversation_events() {
        let logger = Arc::new(RecordingLogger {
            events: Mutex::new(Vec::new()),
        });
        let uc = use_case(EchoGateway::new()).with_logger(logger.clone());
        uc.execute(RunConversationInput::new(
            "brief",
            AdvisorSelection::only([AdvisorId::ProductManager]),
            1,
        ))
        .await
        .unwrap();

        assert_eq!(
            *logger.events.lock().unwrap(),
            vec![
                ConversationEventKind::ConversationStarted,
                ConversationEventKind::AdvisorTurn,
                ConversationEventKind::RoundSynthesis,
                ConversationEventKind::FinalReport,
            ]
        );
    }
}
