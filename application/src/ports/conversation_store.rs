//! Port for conversation persistence.
//!
//! Conversations survive across runs; everything else dies with the
//! pipeline. The store is deliberately synchronous: implementations are
//! local-disk writes on the turn boundary, not part of the hot path.

use thiserror::Error;

use council_domain::{Conversation, ConversationSummary, ConversationTurn};

/// Errors surfaced by a conversation store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Conversation not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Port for storing conversations and their turns
pub trait ConversationStore: Send + Sync {
    /// Create a new empty conversation and persist it
    fn create(&self) -> Result<Conversation, StoreError>;

    /// Load a conversation by id
    fn load(&self, id: &str) -> Result<Conversation, StoreError>;

    /// List stored conversations, newest first
    fn list(&self) -> Result<Vec<ConversationSummary>, StoreError>;

    /// Append a completed or aborted turn to a conversation
    fn record_turn(&self, id: &str, turn: ConversationTurn) -> Result<(), StoreError>;

    /// Replace a conversation's title
    fn set_title(&self, id: &str, title: &str) -> Result<(), StoreError>;

    /// Delete a conversation
    fn delete(&self, id: &str) -> Result<(), StoreError>;
}
