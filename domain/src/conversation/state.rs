//! Conversation state: the provider-facing and display-facing histories.

use crate::session::entities::Message;
use serde::{Deserialize, Serialize};

/// Two append-only views of one conversation.
///
/// `api_history` holds role/content only and is replayed to every provider
/// call as memory. `display_history` holds the same messages, in the same
/// order, with advisor labels and round numbers attached. Both are only
/// ever extended together through the methods below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    api_history: Vec<Message>,
    display_history: Vec<Message>,
}

impl ConversationState {
    /// Open a conversation with the project brief as the first user message
    pub fn start(brief: &str) -> Self {
        let mut state = Self::default();
        state.push(Message::user(brief).at_order(0));
        state
    }

    /// Record one advisor turn in both histories
    pub fn record_turn(&mut self, label: &str, round: usize, content: impl Into<String>) {
        let order = self.display_history.len();
        self.push(
            Message::assistant(content)
                .labeled(label)
                .in_round(round)
                .at_order(order),
        );
    }

    /// Record the final report as the synthesizer's closing turn (no round)
    pub fn record_report(&mut self, label: &str, content: impl Into<String>) {
        let order = self.display_history.len();
        self.push(Message::assistant(content).labeled(label).at_order(order));
    }

    fn push(&mut self, display: Message) {
        self.api_history.push(display.stripped());
        self.display_history.push(display);
    }

    pub fn api_history(&self) -> &[Message] {
        &self.api_history
    }

    pub fn display_history(&self) -> &[Message] {
        &self.display_history
    }

    /// Every api message appears in the display history at the same position
    /// with the same role and content.
    pub fn is_consistent(&self) -> bool {
        self.display_history.len() >= self.api_history.len()
            && self
                .api_history
                .iter()
                .zip(&self.display_history)
                .all(|(api, display)| api.role == display.role && api.content == display.content)
    }

    pub fn into_display_history(self) -> Vec<Message> {
        self.display_history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::entities::Role;

    fn assistant_turns(state: &ConversationState) -> usize {
        state
            .api_history()
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .count()
    }

    #[test]
    fn test_start_seeds_both_histories() {
        let state = ConversationState::start("A bakery app");
        assert_eq!(state.api_history(), &[Message::user("A bakery app")]);
        assert_eq!(state.display_history().len(), 1);
        assert_eq!(state.display_history()[0].content, "A bakery app");
        assert!(state.is_consistent());
    }

    #[test]
    fn test_record_turn_appends_to_both() {
        let mut state = ConversationState::start("brief");
        state.record_turn("Product Manager", 1, "plan");
        state.record_turn("Software Engineer", 1, "stack");

        assert_eq!(state.api_history().len(), 3);
        assert_eq!(state.display_history().len(), 3);
        assert_eq!(assistant_turns(&state), 2);

        let api = &state.api_history()[2];
        assert_eq!(api.role, Role::Assistant);
        assert!(api.agent_label.is_none());

        let display = &state.display_history()[2];
        assert_eq!(display.agent_label.as_deref(), Some("Software Engineer"));
        assert_eq!(display.round, Some(1));
        assert_eq!(display.order, Some(2));
        assert!(state.is_consistent());
    }

    #[test]
    fn test_record_report_has_no_round() {
        let mut state = ConversationState::start("brief");
        state.record_turn("Product Manager", 1, "plan");
        state.record_report("Product Manager", "report");

        let last = state.display_history().last().unwrap();
        assert_eq!(last.round, None);
        assert_eq!(last.agent_label.as_deref(), Some("Product Manager"));
        assert_eq!(assistant_turns(&state), 2);
        assert!(state.is_consistent());
    }
}
