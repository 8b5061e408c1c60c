//! Dispatch settings: offline override and circuit-breaker threshold.

use consortium_domain::DEFAULT_CIRCUIT_THRESHOLD;
use serde::{Deserialize, Serialize};

/// Static settings for the provider dispatcher.
///
/// Provider priority is expressed by the order of the adapters handed to
/// the dispatcher, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSettings {
    /// Skip the network entirely and answer from the offline fallback.
    pub offline: bool,
    /// Consecutive timeouts before a provider is disabled.
    pub circuit_threshold: u32,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            offline: false,
            circuit_threshold: DEFAULT_CIRCUIT_THRESHOLD,
        }
    }
}

impl DispatchSettings {
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn with_circuit_threshold(mut self, threshold: u32) -> Self {
        self.circuit_threshold = threshold.max(1);
        self
    }
}
