//! Conversation transcript logging.
//!
//! [`JsonlConversationLogger`] appends one JSON object per conversation
//! event and implements the application's `ConversationLogger` port.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
