//! Token usage accounting
//!
//! Providers report usage per call; the pipeline folds those reports into
//! per-stage and per-model totals. Two rules hold throughout:
//!
//! - `total_tokens` is always `prompt_tokens + completion_tokens`;
//! - unknown usage is absent, never zero. A call that reported nothing
//!   contributes no record, so totals only ever sum real numbers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::model_id::ModelId;
use crate::orchestration::stage::Stage;

/// Token counts for one model call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

impl TokenUsage {
    /// Build a usage report; the total is derived, not trusted
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }

    /// Fold another report into this one
    pub fn absorb(&mut self, other: &TokenUsage) {
        self.prompt_tokens = self.prompt_tokens.saturating_add(other.prompt_tokens);
        self.completion_tokens = self
            .completion_tokens
            .saturating_add(other.completion_tokens);
        self.total_tokens = self.total_tokens.saturating_add(other.total_tokens);
    }
}

/// One recorded call: which stage, which model, how many tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub stage: Stage,
    pub model: ModelId,
    pub usage: TokenUsage,
}

impl UsageRecord {
    pub fn new(stage: Stage, model: ModelId, usage: TokenUsage) -> Self {
        Self {
            stage,
            model,
            usage,
        }
    }
}

/// Accumulated usage for a whole council run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSummary {
    pub stage1_total: TokenUsage,
    pub stage2_total: TokenUsage,
    pub stage3_total: TokenUsage,
    pub grand_total: TokenUsage,
    /// Per-model totals across all stages, in model-id order
    pub by_model: BTreeMap<ModelId, TokenUsage>,
}

impl UsageSummary {
    /// Fold call records into per-stage, per-model, and grand totals
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a UsageRecord>) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.stage_total_mut(record.stage).absorb(&record.usage);
            summary.grand_total.absorb(&record.usage);
            summary
                .by_model
                .entry(record.model.clone())
                .or_default()
                .absorb(&record.usage);
        }
        summary
    }

    fn stage_total_mut(&mut self, stage: Stage) -> &mut TokenUsage {
        match stage {
            Stage::Responses => &mut self.stage1_total,
            Stage::Rankings => &mut self.stage2_total,
            Stage::Synthesis => &mut self.stage3_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(stage: Stage, model: &str, prompt: u64, completion: u64) -> UsageRecord {
        UsageRecord::new(stage, ModelId::new(model), TokenUsage::new(prompt, completion))
    }

    #[test]
    fn test_total_is_derived() {
        let usage = TokenUsage::new(10, 5);
        assert_eq!(usage.total_tokens, 15);
    }

    #[test]
    fn test_summary_sums_reported_calls() {
        let records = vec![
            record(Stage::Responses, "m/one", 10, 5),
            record(Stage::Responses, "m/two", 20, 8),
            record(Stage::Responses, "m/three", 15, 6),
        ];

        let summary = UsageSummary::from_records(&records);
        assert_eq!(summary.stage1_total.prompt_tokens, 45);
        assert_eq!(summary.stage1_total.completion_tokens, 19);
        assert_eq!(summary.stage1_total.total_tokens, 64);
        assert_eq!(summary.grand_total, summary.stage1_total);
    }

    #[test]
    fn test_stages_bucket_separately() {
        let records = vec![
            record(Stage::Responses, "m/a", 10, 1),
            record(Stage::Rankings, "m/a", 20, 2),
            record(Stage::Synthesis, "m/chair", 30, 3),
        ];

        let summary = UsageSummary::from_records(&records);
        assert_eq!(summary.stage1_total.total_tokens, 11);
        assert_eq!(summary.stage2_total.total_tokens, 22);
        assert_eq!(summary.stage3_total.total_tokens, 33);
        assert_eq!(summary.grand_total.total_tokens, 66);
    }

    #[test]
    fn test_by_model_accumulates_across_stages() {
        let records = vec![
            record(Stage::Responses, "m/a", 10, 1),
            record(Stage::Rankings, "m/a", 5, 2),
            record(Stage::Responses, "m/b", 7, 3),
        ];

        let summary = UsageSummary::from_records(&records);
        let a = &summary.by_model[&ModelId::new("m/a")];
        assert_eq!((a.prompt_tokens, a.completion_tokens), (15, 3));
        assert_eq!(summary.by_model[&ModelId::new("m/b")].total_tokens, 10);
    }

    #[test]
    fn test_no_records_means_zero_summary() {
        let summary = UsageSummary::from_records(&[]);
        assert_eq!(summary.grand_total, TokenUsage::default());
        assert!(summary.by_model.is_empty());
    }
}
