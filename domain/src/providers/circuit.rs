//! Per-provider circuit breaker driven by consecutive timeouts.
//!
//! ```text
//! ACTIVE --timeout--> DEGRADED --timeout (count >= threshold)--> DISABLED
//!   ^                    |
//!   +------success-------+
//! ```
//!
//! Nothing leaves `DISABLED` except an explicit [`CircuitState::reset`].

use serde::{Deserialize, Serialize};

/// Default number of consecutive timeouts before a provider is disabled
pub const DEFAULT_CIRCUIT_THRESHOLD: u32 = 3;

/// Observable health of a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderHealth {
    Active,
    Degraded,
    Disabled,
}

impl ProviderHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderHealth::Active => "active",
            ProviderHealth::Degraded => "degraded",
            ProviderHealth::Disabled => "disabled",
        }
    }
}

impl std::fmt::Display for ProviderHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CircuitState {
    pub consecutive_timeouts: u32,
    pub disabled: bool,
}

impl CircuitState {
    pub fn health(&self) -> ProviderHealth {
        if self.disabled {
            ProviderHealth::Disabled
        } else if self.consecutive_timeouts > 0 {
            ProviderHealth::Degraded
        } else {
            ProviderHealth::Active
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn record_success(&mut self) {
        if !self.disabled {
            self.consecutive_timeouts = 0;
        }
    }

    /// Count a timeout; returns the resulting health
    pub fn record_timeout(&mut self, threshold: u32) -> ProviderHealth {
        if !self.disabled {
            self.consecutive_timeouts = self.consecutive_timeouts.saturating_add(1);
            if self.consecutive_timeouts >= threshold {
                self.disabled = true;
            }
        }
        self.health()
    }

    /// Manual re-enable
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
