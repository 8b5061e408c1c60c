//! Templates used around the advisor turns: the team header, the
//! per-round synthesis, and the final report instruction.

use crate::advisor::id::AdvisorId;
use crate::conversation::report_style::ReportStyle;
use crate::core::string::excerpt;

/// Upper bound (bytes) for each excerpt folded into a round synthesis
pub const SYNTHESIS_EXCERPT_BYTES: usize = 1200;

pub struct ReportTemplate;

impl ReportTemplate {
    /// Instruction handed to the synthesizer for the final report
    pub fn instruction(style: ReportStyle) -> &'static str {
        match style {
            ReportStyle::ExecutiveSummary => {
                r#"Create a comprehensive executive summary of the discussion above, covering:
- Strategic overview and value proposition
- Market opportunity and target segments
- Key success metrics and KPIs
- Implementation timeline and milestones
- Resource requirements and budget estimates
- Risks and mitigation strategies
- Competitive positioning
- ROI projections and success criteria

Format it as a professional business document with clear sections and actionable recommendations."#
            }
            ReportStyle::DetailedAnalysis => {
                r#"Provide an in-depth analysis of the discussion above, covering:
- Market research and competitive landscape
- Technical architecture and implementation plan
- User experience strategy and design recommendations
- Go-to-market and marketing plan
- Financial projections and business model
- Risk assessment and contingency planning
- Success metrics and measurement framework

Include the supporting data, methods and assumptions behind each recommendation."#
            }
            ReportStyle::TechnicalSpecification => {
                r#"Write a technical specification based on the discussion above, covering:
- System architecture and technical requirements
- Technology stack with justifications
- API and integration requirements
- Security and compliance considerations
- Performance and scalability requirements
- Development timeline and resource allocation
- Testing and quality assurance plan
- Deployment and operations

Focus on implementation details an engineering team can act on."#
            }
        }
    }

    /// Header describing the team and assignment (display metadata only)
    pub fn team_header(
        brief: &str,
        advisors: &[AdvisorId],
        style: ReportStyle,
        rounds: usize,
    ) -> String {
        let team = advisors
            .iter()
            .map(|id| id.label())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Consulting team working on: {brief}\n\n\
             Active team members: {team}\n\
             Report format: {style}\n\
             Collaboration depth: {rounds} round(s)"
        )
    }

    /// Compact context carried into the next round.
    ///
    /// Folds at most the first two outputs of the round, each shortened
    /// to [`SYNTHESIS_EXCERPT_BYTES`].
    pub fn round_synthesis(round: usize, outputs: &[String]) -> String {
        let parts = outputs
            .iter()
            .take(2)
            .map(|o| excerpt(o, SYNTHESIS_EXCERPT_BYTES))
            .collect::<Vec<_>>()
            .join(" | ");
        format!("Round {round} synthesis: {parts}")
    }
}
