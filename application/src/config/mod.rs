//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`CouncilParams`] — council run control (per-call timeout, response quorum)

pub mod params;

pub use params::{
    CouncilParams, DEFAULT_CALL_TIMEOUT, DEFAULT_RESPONSE_QUORUM, DEFAULT_TITLE_TIMEOUT,
    MIN_RESPONSE_QUORUM,
};
