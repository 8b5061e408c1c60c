//! Canned fallback text, keyed by advisor and project category.

use super::ProjectCategory;
use crate::advisor::id::AdvisorId;

fn category_summary(category: ProjectCategory) -> &'static str {
    match category {
        ProjectCategory::Marketplace => {
            "Multi-sided commerce: buyer acquisition and seller supply must grow together, \
             and trust (reviews, payments, returns) decides conversion."
        }
        ProjectCategory::HealthFitness => {
            "Habit-driven product: retention depends on visible progress, and any health \
             data collected raises the privacy bar."
        }
        ProjectCategory::MobileApp => {
            "Mobile-first product: onboarding in under a minute, offline tolerance and \
             store review cycles shape every release."
        }
        ProjectCategory::WebPlatform => {
            "Browser-delivered platform: fast first load, account management and a clear \
             upgrade path from free to paid tiers."
        }
        ProjectCategory::FinancialServices => {
            "Regulated money movement: licensing, KYC/AML and auditability come before \
             feature breadth."
        }
        ProjectCategory::General => {
            "Early-stage project: validate the core problem with real users before \
             committing to scale."
        }
    }
}

fn category_points(category: ProjectCategory) -> [&'static str; 3] {
    match category {
        ProjectCategory::Marketplace => [
            "Seed supply first with a curated set of sellers",
            "Escrow-style payments and a clear refund policy",
            "Search, filters and reviews before recommendations",
        ],
        ProjectCategory::HealthFitness => [
            "Daily check-in loop with streaks and reminders",
            "Wearable integrations after the core tracker is stable",
            "Treat health data as sensitive from day one",
        ],
        ProjectCategory::MobileApp => [
            "Single core flow for the MVP, everything else behind it",
            "Crash reporting and analytics in the first build",
            "Push notifications only for user-requested events",
        ],
        ProjectCategory::WebPlatform => [
            "Self-serve signup with a usable free tier",
            "Role-based access for team accounts",
            "Usage analytics to inform pricing",
        ],
        ProjectCategory::FinancialServices => [
            "Partner with a licensed provider before building in-house rails",
            "Immutable audit trail for every balance change",
            "Fraud monitoring and transaction limits at launch",
        ],
        ProjectCategory::General => [
            "Interview ten target users before writing code",
            "Define one success metric for the first release",
            "Ship a narrow MVP and iterate on feedback",
        ],
    }
}

fn advisor_points(advisor: AdvisorId) -> [&'static str; 4] {
    match advisor {
        AdvisorId::ProductManager => [
            "MVP scope limited to the must-have user journey",
            "Roadmap in three phases: launch, retain, expand",
            "KPIs: activation rate, weekly retention, revenue per user",
            "Clear owner for each milestone",
        ],
        AdvisorId::BusinessAnalyst => [
            "Size the addressable market bottom-up",
            "Map the three closest competitors and their pricing",
            "List stakeholder requirements and acceptance criteria",
            "Track assumptions that need validation",
        ],
        AdvisorId::UxDesigner => [
            "Wireframe the primary flow end to end",
            "Accessibility: contrast, keyboard and screen reader support",
            "Usability test with five users per iteration",
            "Consistent design system from the first screen",
        ],
        AdvisorId::MarketingStrategist => [
            "Position against one clear alternative",
            "Launch channels: community, content, targeted ads",
            "Referral incentive once retention is proven",
            "Measure acquisition cost per channel",
        ],
        AdvisorId::TechnicalArchitect => [
            "Modular monolith first, split services only under load",
            "Managed database with automated backups",
            "CI/CD with staging environment",
            "Observability: logs, metrics, alerts",
        ],
        AdvisorId::SoftwareEngineer => [
            "Typed API contracts between client and server",
            "Automated tests on the critical paths",
            "Feature flags for incremental rollout",
            "Code review on every change",
        ],
        AdvisorId::LegalCompliance => [
            "Terms of service and privacy policy before launch",
            "GDPR/CCPA data handling and consent records",
            "Trademark search for the product name",
            "Contracts for partners and contractors",
        ],
        AdvisorId::FinancialAnalyst => [
            "Twelve-month budget with runway estimate",
            "Unit economics: CAC, LTV, gross margin",
            "Break-even scenario under conservative growth",
            "Funding options matched to milestones",
        ],
        AdvisorId::SecurityExpert => [
            "Strong authentication with optional MFA",
            "Encryption in transit and at rest",
            "Least-privilege access to production",
            "Dependency and vulnerability scanning",
        ],
        AdvisorId::OperationsDirector => [
            "Documented support and escalation process",
            "Vendor and tooling inventory with owners",
            "Capacity plan for the first growth spike",
            "Weekly operational metrics review",
        ],
    }
}

pub(super) fn render(advisor: AdvisorId, category: ProjectCategory) -> String {
    let mut out = format!(
        "## {}: {} perspective\n\n{}\n\n### Priorities\n",
        category.title(),
        advisor.label(),
        category_summary(category)
    );
    for point in advisor_points(advisor) {
        out.push_str("- ");
        out.push_str(point);
        out.push('\n');
    }
    out.push_str("\n### Category considerations\n");
    for point in category_points(category) {
        out.push_str("- ");
        out.push_str(point);
        out.push('\n');
    }
    out.push_str("\n_Generated offline; rerun with a provider available for a tailored analysis._");
    out
}
