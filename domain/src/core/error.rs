//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Council has no members")]
    EmptyCouncil,

    #[error("Prompt cannot be empty")]
    EmptyPrompt,

    #[error("Cannot label {count} responses: the label alphabet holds {max}")]
    LabelAlphabetExhausted { count: usize, max: usize },

    #[error("Invalid response label: {0:?}")]
    InvalidLabel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_exhaustion_display() {
        let error = DomainError::LabelAlphabetExhausted { count: 30, max: 26 };
        assert_eq!(
            error.to_string(),
            "Cannot label 30 responses: the label alphabet holds 26"
        );
    }

    #[test]
    fn test_invalid_label_display() {
        let error = DomainError::InvalidLabel("Response 7".to_string());
        assert!(error.to_string().contains("Response 7"));
    }
}
