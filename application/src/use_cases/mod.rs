//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod generate_title;
pub mod run_council;
pub mod usage_ledger;
