//! Core domain concepts shared across all subdomains.
//!
//! - [`model_id::ModelId`] — provider identifier of a language model
//! - [`query::CouncilQuery`] — a validated user turn with attachments
//! - [`roster::CouncilRoster`] — the seated members and chairman
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod model_id;
pub mod query;
pub mod roster;
