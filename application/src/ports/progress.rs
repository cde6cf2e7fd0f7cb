//! Progress notification port
//!
//! Defines the interface for reporting progress during a council run.
//! Progress is advisory: implementations must not fail or block the
//! pipeline, and the pipeline never waits on them.

use council_domain::{ModelId, Stage};

/// Callback for progress updates during a council run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, progress bars, etc.)
pub trait CouncilProgress: Send + Sync {
    /// Called when a stage starts, with the number of calls it will make
    fn on_stage_start(&self, stage: &Stage, total_calls: usize);

    /// Called when one model call settles within a stage
    fn on_call_settled(&self, stage: &Stage, model: &ModelId, success: bool);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: &Stage);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl CouncilProgress for NoProgress {
    fn on_stage_start(&self, _stage: &Stage, _total_calls: usize) {}
    fn on_call_settled(&self, _stage: &Stage, _model: &ModelId, _success: bool) {}
    fn on_stage_complete(&self, _stage: &Stage) {}
}
