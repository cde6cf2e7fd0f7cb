//! Council run parameters — use case control knobs.
//!
//! [`CouncilParams`] groups the static parameters that control a council
//! run in [`RunCouncilUseCase`](crate::use_cases::run_council::RunCouncilUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimum number of usable first-stage responses required to proceed.
///
/// With fewer than two responses there is nothing to rank against, so the
/// quorum can be raised but never lowered below this.
pub const MIN_RESPONSE_QUORUM: usize = 2;

/// Default quorum of usable first-stage responses.
pub const DEFAULT_RESPONSE_QUORUM: usize = MIN_RESPONSE_QUORUM;

/// Default timeout for a single council member call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(120);

/// Default timeout for the conversation title call.
pub const DEFAULT_TITLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Control parameters for a council run.
///
/// Controls per-call timeouts and the first-stage quorum. Stage structure
/// itself is fixed; these only tune how patient and how strict a run is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouncilParams {
    /// Timeout applied to each individual model call.
    pub call_timeout: Duration,
    /// Minimum usable first-stage responses required to continue.
    pub response_quorum: usize,
}

impl Default for CouncilParams {
    fn default() -> Self {
        Self {
            call_timeout: DEFAULT_CALL_TIMEOUT,
            response_quorum: DEFAULT_RESPONSE_QUORUM,
        }
    }
}

impl CouncilParams {
    // ==================== Builder Methods ====================

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Raise the response quorum. Values below [`MIN_RESPONSE_QUORUM`] are
    /// clamped up; a single response can never carry a council run.
    pub fn with_response_quorum(mut self, quorum: usize) -> Self {
        self.response_quorum = quorum.max(MIN_RESPONSE_QUORUM);
        self
    }
}
