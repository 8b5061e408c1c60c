//! Round-count bounds for a conversation.

use consortium_domain::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationBounds {
    pub min_rounds: usize,
    pub max_rounds: usize,
    pub default_rounds: usize,
}

impl Default for ConversationBounds {
    fn default() -> Self {
        Self {
            min_rounds: 1,
            max_rounds: 5,
            default_rounds: 2,
        }
    }
}

impl ConversationBounds {
    pub fn check(&self, rounds: usize) -> Result<usize, DomainError> {
        if rounds == 0 || rounds < self.min_rounds || rounds > self.max_rounds {
            return Err(DomainError::InvalidRounds {
                rounds,
                min: self.min_rounds.max(1),
                max: self.max_rounds,
            });
        }
        Ok(rounds)
    }
}
