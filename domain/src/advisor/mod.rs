//! Advisor domain.
//!
//! - [`id::AdvisorId`]: the closed set of advisor roles, in canonical order
//! - [`spec::AdvisorSpec`]: preamble and sampling settings for one role
//! - [`roster::AdvisorRoster`]: the start-up registry of available advisors
//! - [`roster::AdvisorSelection`]: which advisors one conversation uses

pub mod id;
pub mod roster;
pub mod spec;
