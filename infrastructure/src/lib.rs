//! Infrastructure layer for llm-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod openrouter;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, FileConfig, FileCouncilConfig, FileInvokerConfig, FileOutputConfig,
    FileStorageConfig, Severity,
};
pub use openrouter::{API_KEY_ENV, OPENROUTER_API_URL, OpenRouterInvoker};
pub use storage::JsonConversationStore;
