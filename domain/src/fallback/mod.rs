//! Offline fallback responder.
//!
//! A pure function from `(project text, advisor)` to canned text, used when
//! no provider produced a completion (or when the operator runs offline).
//! No I/O, no randomness: identical inputs always produce identical output.

mod templates;

use crate::advisor::id::AdvisorId;
use serde::{Deserialize, Serialize};

/// Coarse project classification derived from keywords in the brief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    Marketplace,
    HealthFitness,
    MobileApp,
    WebPlatform,
    FinancialServices,
    General,
}

impl ProjectCategory {
    /// First match wins, so the more specific categories come first.
    const KEYWORDS: [(ProjectCategory, &'static [&'static str]); 5] = [
        (
            ProjectCategory::Marketplace,
            &[
                "ecommerce",
                "e-commerce",
                "shop",
                "store",
                "marketplace",
                "retail",
                "shopping",
            ],
        ),
        (
            ProjectCategory::HealthFitness,
            &["fitness", "health", "workout", "exercise", "gym", "wellness"],
        ),
        (
            ProjectCategory::MobileApp,
            &["mobile", "app", "ios", "android", "smartphone"],
        ),
        (
            ProjectCategory::WebPlatform,
            &["web", "website", "platform", "browser", "online", "saas"],
        ),
        (
            ProjectCategory::FinancialServices,
            &["fintech", "finance", "banking", "payment", "money", "financial"],
        ),
    ];

    pub fn classify(project_text: &str) -> Self {
        let lower = project_text.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
            .map(|(category, _)| *category)
            .unwrap_or(ProjectCategory::General)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ProjectCategory::Marketplace => "Marketplace / Retail",
            ProjectCategory::HealthFitness => "Health & Fitness",
            ProjectCategory::MobileApp => "Mobile Application",
            ProjectCategory::WebPlatform => "Web Platform",
            ProjectCategory::FinancialServices => "Financial Services",
            ProjectCategory::General => "General Project",
        }
    }
}

/// Deterministic network-free responder.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineFallback;

impl OfflineFallback {
    pub fn respond(&self, project_text: &str, advisor: AdvisorId) -> String {
        let category = ProjectCategory::classify(project_text);
        format!(
            "💡 **{} Analysis:**\n\n{}",
            advisor.label(),
            templates::render(advisor, category)
        )
    }
}
