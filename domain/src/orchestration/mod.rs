//! Council orchestration domain
//!
//! Stage identities and the immutable result types each stage produces.

pub mod results;
pub mod stage;
