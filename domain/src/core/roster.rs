//! Council roster value object

use serde::{Deserialize, Serialize};

use crate::core::error::DomainError;
use crate::core::model_id::ModelId;

/// The models seated for a council run: the answering members plus the
/// chairman that synthesizes the final answer.
///
/// The chairman may also appear as a member; the roles are independent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouncilRoster {
    members: Vec<ModelId>,
    chairman: ModelId,
}

impl CouncilRoster {
    pub fn new(members: Vec<ModelId>, chairman: ModelId) -> Self {
        Self { members, chairman }
    }

    /// The stock lineup: free-tier members with a strong chairman
    pub fn stock() -> Self {
        Self {
            members: vec![
                ModelId::new("openai/gpt-oss-20b:free"),
                ModelId::new("google/gemma-3-27b-it:free"),
                ModelId::new("meta-llama/llama-3.3-70b-instruct:free"),
                ModelId::new("x-ai/grok-4.1-fast:free"),
                ModelId::new("qwen/qwen3-235b-a22b:free"),
                ModelId::new("nousresearch/hermes-3-llama-3.1-405b:free"),
                ModelId::new("mistralai/mistral-small-3.1-24b-instruct:free"),
                ModelId::new("tngtech/deepseek-r1t2-chimera:free"),
            ],
            chairman: ModelId::new("google/gemini-3-pro-preview"),
        }
    }

    /// Require at least one seated member
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.members.is_empty() {
            return Err(DomainError::EmptyCouncil);
        }
        Ok(())
    }

    pub fn members(&self) -> &[ModelId] {
        &self.members
    }

    pub fn chairman(&self) -> &ModelId {
        &self.chairman
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_roster_invalid() {
        let roster = CouncilRoster::new(vec![], ModelId::new("c/chair"));
        assert_eq!(roster.validate().unwrap_err(), DomainError::EmptyCouncil);
    }

    #[test]
    fn test_stock_roster_is_valid() {
        let roster = CouncilRoster::stock();
        assert!(roster.validate().is_ok());
        assert_eq!(roster.len(), 8);
        assert_eq!(
            roster.chairman().as_str(),
            "google/gemini-3-pro-preview"
        );
    }
}
