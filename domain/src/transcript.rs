//! Persisted conversation records
//!
//! A conversation is a sequence of turns; each turn is one prompt put
//! before the council and what came of it. Turns are written once, after
//! the pipeline completes or aborts — in-flight stage state is never
//! persisted.

use serde::{Deserialize, Serialize};

use crate::orchestration::results::CouncilVerdict;

/// Title given to conversations before one is generated
pub const UNTITLED: &str = "New Conversation";

/// How one turn ended
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// The pipeline completed; the verdict holds all three stages
    Completed { verdict: Box<CouncilVerdict> },
    /// The pipeline failed hard; only the stable reason code survives
    Aborted { reason: String },
}

/// One recorded council turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// 1-based position within the conversation
    pub sequence: u64,
    /// RFC 3339 timestamp of when the turn ran
    pub created_at: String,
    /// The prompt as the user gave it (without inlined documents)
    pub prompt: String,
    /// Names of files attached to the prompt
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachment_names: Vec<String>,
    #[serde(flatten)]
    pub outcome: TurnOutcome,
}

impl ConversationTurn {
    /// Record a completed run
    pub fn completed(
        sequence: u64,
        created_at: impl Into<String>,
        prompt: impl Into<String>,
        attachment_names: Vec<String>,
        verdict: CouncilVerdict,
    ) -> Self {
        Self {
            sequence,
            created_at: created_at.into(),
            prompt: prompt.into(),
            attachment_names,
            outcome: TurnOutcome::Completed {
                verdict: Box::new(verdict),
            },
        }
    }

    /// Record a hard failure
    pub fn aborted(
        sequence: u64,
        created_at: impl Into<String>,
        prompt: impl Into<String>,
        attachment_names: Vec<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            sequence,
            created_at: created_at.into(),
            prompt: prompt.into(),
            attachment_names,
            outcome: TurnOutcome::Aborted {
                reason: reason.into(),
            },
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, TurnOutcome::Completed { .. })
    }

    /// The verdict, when this turn completed
    pub fn verdict(&self) -> Option<&CouncilVerdict> {
        match &self.outcome {
            TurnOutcome::Completed { verdict } => Some(verdict),
            TurnOutcome::Aborted { .. } => None,
        }
    }
}

/// A stored conversation: metadata plus its turns in order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    /// RFC 3339 timestamp of creation
    pub created_at: String,
    #[serde(default)]
    pub turns: Vec<ConversationTurn>,
}

impl Conversation {
    pub fn new(id: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: UNTITLED.to_string(),
            created_at: created_at.into(),
            turns: Vec::new(),
        }
    }

    /// Sequence number the next recorded turn should carry
    pub fn next_sequence(&self) -> u64 {
        self.turns.len() as u64 + 1
    }

    pub fn add_turn(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }
}

/// Listing row for a stored conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub turn_count: usize,
}

impl From<&Conversation> for ConversationSummary {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id.clone(),
            title: conversation.title.clone(),
            created_at: conversation.created_at.clone(),
            turn_count: conversation.turns.len(),
        }
    }
}
