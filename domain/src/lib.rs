//! Domain layer for llm-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A council run puts one query before several models and distills their
//! answers in three stages:
//!
//! - **Responses**: every member answers independently
//! - **Peer Rankings**: members rank the anonymized response set
//! - **Synthesis**: a chairman model writes the final answer
//!
//! ## Anonymity
//!
//! Between the first and second stage, responses lose their attribution and
//! gain randomized `Response A`-style labels. The assignment stays sealed in
//! a [`LabelMap`] until rank aggregation discloses it.

pub mod core;
pub mod council;
pub mod orchestration;
pub mod prompt;
pub mod transcript;
pub mod usage;

// Re-export commonly used types
pub use crate::core::{
    error::DomainError,
    model_id::ModelId,
    query::{Attachment, CouncilQuery},
    roster::CouncilRoster,
};
pub use crate::council::{
    aggregate::{AggregateRanking, LabelStanding},
    anonymize::{AnonymizedResponse, Anonymizer, LabelMap},
    label::Label,
    ranking::{FINAL_RANKING_MARKER, RankingSubmission, SubmissionError, parse_ranking},
};
pub use crate::orchestration::{
    results::{CouncilVerdict, ModelResult, RankingOutcome, SynthesisResult},
    stage::Stage,
};
pub use crate::prompt::PromptTemplate;
pub use crate::transcript::{
    Conversation, ConversationSummary, ConversationTurn, TurnOutcome, UNTITLED,
};
pub use crate::usage::{TokenUsage, UsageRecord, UsageSummary};
