//! Pipeline stages

use serde::{Deserialize, Serialize};

/// Stage of a council run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Stage 1 - every member answers the query independently
    Responses,
    /// Stage 2 - members rank the anonymized response set
    Rankings,
    /// Stage 3 - the chairman synthesizes the final answer
    Synthesis,
}

impl Stage {
    pub fn as_str(&self) -> &str {
        match self {
            Stage::Responses => "responses",
            Stage::Rankings => "rankings",
            Stage::Synthesis => "synthesis",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Stage::Responses => "Stage 1: Responses",
            Stage::Rankings => "Stage 2: Peer Rankings",
            Stage::Synthesis => "Stage 3: Synthesis",
        }
    }

    /// 1-based stage number
    pub fn number(&self) -> u8 {
        match self {
            Stage::Responses => 1,
            Stage::Rankings => 2,
            Stage::Synthesis => 3,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
