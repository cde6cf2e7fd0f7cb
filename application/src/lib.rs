//! Application layer for llm-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{CouncilParams, DEFAULT_RESPONSE_QUORUM, MIN_RESPONSE_QUORUM};
pub use ports::{
    conversation_store::{ConversationStore, StoreError},
    model_invoker::{InvocationError, ModelAnswer, ModelInvoker},
    progress::{CouncilProgress, NoProgress},
};
pub use use_cases::generate_title::{DEFAULT_TITLE_MODEL, GenerateTitleUseCase};
pub use use_cases::run_council::{RunCouncilError, RunCouncilInput, RunCouncilUseCase};
pub use use_cases::usage_ledger::UsageLedger;
