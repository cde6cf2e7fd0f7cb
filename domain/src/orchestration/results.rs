//! Orchestration value objects - immutable result types for council runs.
//!
//! These types record what each stage produced:
//! - [`ModelResult`] - one model's outcome at one stage
//! - [`RankingOutcome`] - a Stage-2 reply with its parsed submission, if valid
//! - [`SynthesisResult`] - the chairman's final answer
//! - [`CouncilVerdict`] - everything a completed run hands back

use serde::{Deserialize, Serialize};

use crate::core::model_id::ModelId;
use crate::council::aggregate::AggregateRanking;
use crate::council::ranking::RankingSubmission;
use crate::orchestration::stage::Stage;
use crate::usage::{TokenUsage, UsageSummary};

/// Outcome of one model call at one stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResult {
    /// The model that was called
    pub model: ModelId,
    /// The stage this call belonged to
    pub stage: Stage,
    /// Response text; empty when the call failed
    pub content: String,
    /// Whether the call produced a usable response
    pub success: bool,
    /// Failure description when it did not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Token usage as reported by the provider; absent when unreported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

impl ModelResult {
    /// A usable response, with whatever usage the provider reported
    pub fn answered(
        model: ModelId,
        stage: Stage,
        content: impl Into<String>,
        usage: Option<TokenUsage>,
    ) -> Self {
        Self {
            model,
            stage,
            content: content.into(),
            success: true,
            error: None,
            usage,
        }
    }

    /// A failed call; the reason is kept for the verdict and the logs
    pub fn failed(model: ModelId, stage: Stage, error: impl Into<String>) -> Self {
        Self {
            model,
            stage,
            content: String::new(),
            success: false,
            error: Some(error.into()),
            usage: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

/// One member's Stage-2 outcome: the raw call plus the validated submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingOutcome {
    /// The underlying call outcome; `content` holds the full ranking text
    pub result: ModelResult,
    /// The validated ranking, when the reply parsed to an exact permutation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<RankingSubmission>,
    /// Why the reply was rejected, when it arrived but did not validate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_reason: Option<String>,
}

impl RankingOutcome {
    /// A reply that validated into a usable submission
    pub fn valid(result: ModelResult, submission: RankingSubmission) -> Self {
        Self {
            result,
            submission: Some(submission),
            invalid_reason: None,
        }
    }

    /// A reply that arrived but failed permutation validation
    pub fn rejected(result: ModelResult, reason: impl Into<String>) -> Self {
        Self {
            result,
            submission: None,
            invalid_reason: Some(reason.into()),
        }
    }

    /// A member that produced no ranking at all
    pub fn failed(result: ModelResult) -> Self {
        Self {
            result,
            submission: None,
            invalid_reason: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.submission.is_some()
    }
}

/// The chairman's synthesis of the whole council run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisResult {
    /// The chairman model
    pub chairman: ModelId,
    /// The final answer
    pub text: String,
    /// Token usage as reported by the provider; absent when unreported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

impl SynthesisResult {
    pub fn new(chairman: ModelId, text: impl Into<String>, usage: Option<TokenUsage>) -> Self {
        Self {
            chairman,
            text: text.into(),
            usage,
        }
    }
}

/// Complete result of a council run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouncilVerdict {
    /// The prompt the council answered
    pub prompt: String,
    /// Stage 1: every member's response attempt, successes and failures
    pub responses: Vec<ModelResult>,
    /// Stage 2: every member's ranking outcome
    pub rankings: Vec<RankingOutcome>,
    /// The consensus ordering with disclosed attribution
    pub aggregate: AggregateRanking,
    /// Stage 3: the chairman's answer
    pub synthesis: SynthesisResult,
    /// Token accounting for the whole run
    pub usage: UsageSummary,
}

impl CouncilVerdict {
    pub fn new(
        prompt: impl Into<String>,
        responses: Vec<ModelResult>,
        rankings: Vec<RankingOutcome>,
        aggregate: AggregateRanking,
        synthesis: SynthesisResult,
        usage: UsageSummary,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            responses,
            rankings,
            aggregate,
            synthesis,
            usage,
        }
    }

    /// Returns an iterator over only the successful first-stage responses.
    pub fn successful_responses(&self) -> impl Iterator<Item = &ModelResult> {
        self.responses.iter().filter(|r| r.success)
    }

    /// Returns an iterator over only the failed first-stage responses.
    pub fn failed_responses(&self) -> impl Iterator<Item = &ModelResult> {
        self.responses.iter().filter(|r| !r.success)
    }

    /// Returns an iterator over the validated ranking submissions.
    pub fn valid_submissions(&self) -> impl Iterator<Item = &RankingSubmission> {
        self.rankings.iter().filter_map(|r| r.submission.as_ref())
    }

    /// The council's final answer
    pub fn final_answer(&self) -> &str {
        &self.synthesis.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answered_and_failed_results() {
        let ok = ModelResult::answered(
            ModelId::new("m/a"),
            Stage::Responses,
            "hello",
            Some(TokenUsage::new(3, 4)),
        );
        assert!(ok.is_success());
        assert_eq!(ok.content, "hello");

        let bad = ModelResult::failed(ModelId::new("m/b"), Stage::Responses, "timed out");
        assert!(!bad.is_success());
        assert_eq!(bad.error.as_deref(), Some("timed out"));
        assert!(bad.usage.is_none());
    }

    #[test]
    fn test_failure_serialization_skips_empty_fields() {
        let bad = ModelResult::failed(ModelId::new("m/b"), Stage::Rankings, "no reply");
        let json = serde_json::to_value(&bad).unwrap();
        assert_eq!(json["stage"], "rankings");
        assert!(json.get("usage").is_none());
    }

    #[test]
    fn test_ranking_outcome_validity() {
        let result = ModelResult::failed(ModelId::new("m/b"), Stage::Rankings, "no reply");
        let outcome = RankingOutcome::failed(result);
        assert!(!outcome.is_valid());
        assert!(outcome.invalid_reason.is_none());

        let rejected = RankingOutcome::rejected(
            ModelResult::answered(ModelId::new("m/c"), Stage::Rankings, "gibberish", None),
            "Ranking omits 2 of 3 responses",
        );
        assert!(!rejected.is_valid());
        assert!(rejected.invalid_reason.is_some());
    }
}
