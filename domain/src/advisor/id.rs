//! Advisor identifiers (closed set, canonical order)

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Every advisor role the consortium knows about.
///
/// The declaration order is the canonical speaking order within a round;
/// [`AdvisorId::ALL`] mirrors it and is what the orchestrator iterates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorId {
    ProductManager,
    BusinessAnalyst,
    UxDesigner,
    MarketingStrategist,
    TechnicalArchitect,
    SoftwareEngineer,
    LegalCompliance,
    FinancialAnalyst,
    SecurityExpert,
    OperationsDirector,
}

impl AdvisorId {
    /// All advisors in canonical speaking order
    pub const ALL: [AdvisorId; 10] = [
        AdvisorId::ProductManager,
        AdvisorId::BusinessAnalyst,
        AdvisorId::UxDesigner,
        AdvisorId::MarketingStrategist,
        AdvisorId::TechnicalArchitect,
        AdvisorId::SoftwareEngineer,
        AdvisorId::LegalCompliance,
        AdvisorId::FinancialAnalyst,
        AdvisorId::SecurityExpert,
        AdvisorId::OperationsDirector,
    ];

    /// Stable machine identifier (config keys, JSON)
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisorId::ProductManager => "product_manager",
            AdvisorId::BusinessAnalyst => "business_analyst",
            AdvisorId::UxDesigner => "ux_designer",
            AdvisorId::MarketingStrategist => "marketing_strategist",
            AdvisorId::TechnicalArchitect => "technical_architect",
            AdvisorId::SoftwareEngineer => "software_engineer",
            AdvisorId::LegalCompliance => "legal_compliance",
            AdvisorId::FinancialAnalyst => "financial_analyst",
            AdvisorId::SecurityExpert => "security_expert",
            AdvisorId::OperationsDirector => "operations_director",
        }
    }

    /// Human-facing label used to tag display transcript entries
    pub fn label(&self) -> &'static str {
        match self {
            AdvisorId::ProductManager => "Product Manager",
            AdvisorId::BusinessAnalyst => "Business Analyst",
            AdvisorId::UxDesigner => "UX Designer",
            AdvisorId::MarketingStrategist => "Marketing Strategist",
            AdvisorId::TechnicalArchitect => "Technical Architect",
            AdvisorId::SoftwareEngineer => "Software Engineer",
            AdvisorId::LegalCompliance => "Legal Compliance",
            AdvisorId::FinancialAnalyst => "Financial Analyst",
            AdvisorId::SecurityExpert => "Security Expert",
            AdvisorId::OperationsDirector => "Operations Director",
        }
    }

    /// Position in the canonical order (0-based)
    pub fn canonical_index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|id| id == self)
            .unwrap_or(Self::ALL.len())
    }

    /// The lead advisor opens each round and writes the final report
    pub fn is_lead(&self) -> bool {
        matches!(self, AdvisorId::ProductManager)
    }

    /// Whether this advisor's output replaces the running context.
    ///
    /// The lead, the analyst answering it and the engineer closing the
    /// core team redirect the conversation; everyone else only comments.
    pub fn carries_context(&self) -> bool {
        matches!(
            self,
            AdvisorId::ProductManager | AdvisorId::BusinessAnalyst | AdvisorId::SoftwareEngineer
        )
    }

    /// Whether the advisor is selected when the caller gives no selection
    pub fn enabled_by_default(&self) -> bool {
        matches!(
            self,
            AdvisorId::ProductManager | AdvisorId::BusinessAnalyst | AdvisorId::SoftwareEngineer
        )
    }
}

impl std::fmt::Display for AdvisorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdvisorId {
    type Err = DomainError;

    /// Accepts the machine id, the display label, or a short alias
    /// (`pm`, `lead`, `analyst`, `ux`, `marketing`, `architect`, `engineer`,
    /// `legal`, `finance`, `security`, `operations`). Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        let id = match normalized.as_str() {
            "product_manager" | "pm" | "lead" => AdvisorId::ProductManager,
            "business_analyst" | "analyst" => AdvisorId::BusinessAnalyst,
            "ux_designer" | "ux" | "designer" => AdvisorId::UxDesigner,
            "marketing_strategist" | "marketing" => AdvisorId::MarketingStrategist,
            "technical_architect" | "tech_architect" | "architect" => {
                AdvisorId::TechnicalArchitect
            }
            "software_engineer" | "engineer" => AdvisorId::SoftwareEngineer,
            "legal_compliance" | "legal" => AdvisorId::LegalCompliance,
            "financial_analyst" | "finance" | "financial" => AdvisorId::FinancialAnalyst,
            "security_expert" | "security" => AdvisorId::SecurityExpert,
            "operations_director" | "operations" | "ops" => AdvisorId::OperationsDirector,
            _ => return Err(DomainError::UnknownAdvisor(s.to_string())),
        };
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_matches_declaration() {
        let mut sorted = AdvisorId::ALL;
        sorted.sort();
        assert_eq!(sorted, AdvisorId::ALL);
        assert_eq!(AdvisorId::ProductManager.canonical_index(), 0);
        assert_eq!(AdvisorId::OperationsDirector.canonical_index(), 9);
    }

    #[test]
    fn test_parse_accepts_id_label_and_alias() {
        assert_eq!("product_manager".parse::<AdvisorId>().unwrap(), AdvisorId::ProductManager);
        assert_eq!("Product Manager".parse::<AdvisorId>().unwrap(), AdvisorId::ProductManager);
        assert_eq!("lead".parse::<AdvisorId>().unwrap(), AdvisorId::ProductManager);
        assert_eq!("UX Designer".parse::<AdvisorId>().unwrap(), AdvisorId::UxDesigner);
        assert_eq!("tech-architect".parse::<AdvisorId>().unwrap(), AdvisorId::TechnicalArchitect);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "cto".parse::<AdvisorId>().unwrap_err();
        assert_eq!(err, DomainError::UnknownAdvisor("cto".to_string()));
    }

    #[test]
    fn test_round_trip_through_as_str() {
        for id in AdvisorId::ALL {
            assert_eq!(id.as_str().parse::<AdvisorId>().unwrap(), id);
            assert_eq!(id.label().parse::<AdvisorId>().unwrap(), id);
        }
    }

    #[test]
    fn test_context_carrying_subset() {
        let carriers: Vec<_> = AdvisorId::ALL
            .into_iter()
            .filter(|id| id.carries_context())
            .collect();
        assert_eq!(
            carriers,
            vec![
                AdvisorId::ProductManager,
                AdvisorId::BusinessAnalyst,
                AdvisorId::SoftwareEngineer
            ]
        );
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&AdvisorId::UxDesigner).unwrap();
        assert_eq!(json, "\"ux_designer\"");
    }
}
