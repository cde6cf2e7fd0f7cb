//! Conversation persistence
//!
//! Implements the application's [`ConversationStore`] port on local disk.
//!
//! [`ConversationStore`]: council_application::ports::conversation_store::ConversationStore

pub mod json_store;

pub use json_store::JsonConversationStore;
