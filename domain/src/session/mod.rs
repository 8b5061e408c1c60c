//! Conversation message primitives.
//!
//! - [`entities::Message`]: a single message exchanged with a provider
//! - [`entities::Role`]: system / user / assistant

pub mod entities;
