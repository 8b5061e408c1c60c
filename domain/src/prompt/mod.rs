//! Prompt domain
//!
//! Advisor preambles and the templates wrapped around advisor turns.

pub mod advisor;
mod report;

pub use advisor::default_preamble;
pub use report::{ReportTemplate, SYNTHESIS_EXCERPT_BYTES};
