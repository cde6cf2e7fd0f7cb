//! Progress reporting for council runs

use colored::Colorize;
use council_application::ports::progress::CouncilProgress;
use council_domain::{ModelId, Stage};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during a council run with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn stage_short_name(stage: &Stage) -> String {
        format!("Stage {}", stage.number())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CouncilProgress for ProgressReporter {
    fn on_stage_start(&self, stage: &Stage, total_calls: usize) {
        let pb = self.multi.add(ProgressBar::new(total_calls as u64));
        pb.set_style(Self::stage_style());
        pb.set_prefix(stage.display_name().to_string());
        pb.set_message("Starting...");

        *self.stage_bar.lock().unwrap() = Some(pb);
    }

    fn on_call_settled(&self, _stage: &Stage, model: &ModelId, success: bool) {
        if let Some(pb) = self.stage_bar.lock().unwrap().as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), model)
            } else {
                format!("{} {}", "x".red(), model)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_stage_complete(&self, stage: &Stage) {
        if let Some(pb) = self.stage_bar.lock().unwrap().take() {
            pb.finish_with_message(format!("{} complete", Self::stage_short_name(stage).green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
///
/// Writes to stderr so formatted output on stdout stays clean.
pub struct SimpleProgress;

impl CouncilProgress for SimpleProgress {
    fn on_stage_start(&self, stage: &Stage, total_calls: usize) {
        eprintln!(
            "{} {} ({} calls)",
            "->".cyan(),
            stage.display_name().bold(),
            total_calls
        );
    }

    fn on_call_settled(&self, _stage: &Stage, model: &ModelId, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), model);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), model);
        }
    }

    fn on_stage_complete(&self, _stage: &Stage) {
        eprintln!();
    }
}
