//! Core domain concepts shared across all subdomains.
//!
//! - [`brief::ProjectBrief`]: the validated project submitted for review
//! - [`error::DomainError`]: domain-level errors

pub mod brief;
pub mod error;
pub mod string;
