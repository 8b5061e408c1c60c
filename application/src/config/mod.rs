//! Application-level configuration.
//!
//! These types are built once from the loaded configuration file and
//! handed to the dispatcher and use cases as immutable values:
//!
//! - [`DispatchSettings`]: offline override and circuit threshold
//! - [`ConversationBounds`]: allowed and default round counts

pub mod conversation_bounds;
pub mod dispatch_settings;

pub use conversation_bounds::ConversationBounds;
pub use dispatch_settings::DispatchSettings;
