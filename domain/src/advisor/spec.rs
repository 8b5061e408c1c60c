//! Advisor specification (immutable role configuration)

use super::id::AdvisorId;
use crate::core::error::DomainError;
use crate::prompt::advisor::default_preamble;
use serde::{Deserialize, Serialize};

/// Highest sampling temperature any backend accepts
pub const MAX_TEMPERATURE: f32 = 2.0;

/// Sampling parameters sent with every completion request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl SamplingParams {
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}

/// A named role bound to a fixed instruction preamble and sampling settings.
///
/// Created once at start-up from built-in defaults plus configuration
/// overrides, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorSpec {
    pub id: AdvisorId,
    pub instruction_preamble: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl AdvisorSpec {
    /// Build and validate a spec
    pub fn new(
        id: AdvisorId,
        instruction_preamble: impl Into<String>,
        temperature: f32,
        max_output_tokens: u32,
    ) -> Result<Self, DomainError> {
        let spec = Self {
            id,
            instruction_preamble: instruction_preamble.into(),
            temperature,
            max_output_tokens,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Built-in settings for an advisor
    pub fn builtin(id: AdvisorId) -> Self {
        let (temperature, max_output_tokens) = match id {
            AdvisorId::ProductManager => (0.7, 2000),
            AdvisorId::BusinessAnalyst => (0.6, 2000),
            AdvisorId::UxDesigner => (0.8, 2500),
            AdvisorId::MarketingStrategist => (0.8, 2500),
            AdvisorId::TechnicalArchitect => (0.6, 1000),
            AdvisorId::SoftwareEngineer => (0.5, 2500),
            AdvisorId::LegalCompliance => (0.1, 300),
            AdvisorId::FinancialAnalyst => (0.1, 300),
            AdvisorId::SecurityExpert => (0.1, 300),
            AdvisorId::OperationsDirector => (0.5, 1000),
        };
        Self {
            id,
            instruction_preamble: default_preamble(id).to_string(),
            temperature,
            max_output_tokens,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !(0.0..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(DomainError::InvalidAdvisorSpec {
                advisor: self.id.to_string(),
                reason: format!(
                    "temperature {} must be within 0..={}",
                    self.temperature, MAX_TEMPERATURE
                ),
            });
        }
        if self.max_output_tokens == 0 {
            return Err(DomainError::InvalidAdvisorSpec {
                advisor: self.id.to_string(),
                reason: "max_output_tokens must be greater than 0".to_string(),
            });
        }
        if self.instruction_preamble.trim().is_empty() {
            return Err(DomainError::InvalidAdvisorSpec {
                advisor: self.id.to_string(),
                reason: "instruction preamble cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn sampling(&self) -> SamplingParams {
        SamplingParams::new(self.temperature, self.max_output_tokens)
    }

    pub fn label(&self) -> &'static str {
        self.id.label()
    }
}
