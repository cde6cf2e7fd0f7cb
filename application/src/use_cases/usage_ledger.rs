//! Token usage ledger shared across concurrent model calls.

use council_domain::{ModelId, Stage, TokenUsage, UsageRecord, UsageSummary};
use std::sync::Mutex;

/// Collects per-call token usage from concurrently running tasks.
///
/// Cloned behind an `Arc` into each spawned call; every successful call
/// records exactly one entry. Failed calls record nothing — absent usage
/// is unknown, not zero. A poisoned lock still holds every record pushed
/// before the panic, so the ledger recovers it instead of propagating.
#[derive(Debug, Default)]
pub struct UsageLedger {
    records: Mutex<Vec<UsageRecord>>,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record usage reported by one successful model call.
    pub fn record(&self, stage: Stage, model: &ModelId, usage: TokenUsage) {
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        records.push(UsageRecord {
            stage,
            model: model.clone(),
            usage,
        });
    }

    /// Snapshot of every record taken so far, in recording order.
    pub fn records(&self) -> Vec<UsageRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Fold all records into per-stage and per-model totals.
    pub fn summarize(&self) -> UsageSummary {
        let records = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        UsageSummary::from_records(records.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_record_and_summarize() {
        let ledger = UsageLedger::new();
        ledger.record(
            Stage::Responses,
            &ModelId::from("a/one"),
            TokenUsage::new(10, 5),
        );
        ledger.record(
            Stage::Rankings,
            &ModelId::from("a/one"),
            TokenUsage::new(20, 8),
        );

        let summary = ledger.summarize();
        assert_eq!(summary.stage1_total.total_tokens, 15);
        assert_eq!(summary.stage2_total.total_tokens, 28);
        assert_eq!(summary.grand_total.total_tokens, 43);
        assert_eq!(summary.by_model.len(), 1);
    }

    #[test]
    fn test_empty_ledger_summarizes_to_zero() {
        let ledger = UsageLedger::new();
        let summary = ledger.summarize();
        assert_eq!(summary.grand_total.total_tokens, 0);
        assert!(summary.by_model.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_recording_loses_nothing() {
        let ledger = Arc::new(UsageLedger::new());
        let mut handles = Vec::new();
        for i in 0..16u64 {
            let ledger = Arc::clone(&ledger);
            handles.push(tokio::spawn(async move {
                let model = ModelId::from(format!("vendor/model-{i}"));
                ledger.record(Stage::Responses, &model, TokenUsage::new(i, i));
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(ledger.records().len(), 16);
        let summary = ledger.summarize();
        assert_eq!(summary.by_model.len(), 16);
        // sum of 0..16 on both prompt and completion sides
        assert_eq!(summary.grand_total.total_tokens, 240);
    }
}
