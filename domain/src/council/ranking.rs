//! Peer-ranking submissions: parsing and permutation validation
//!
//! Members reply to the ranking prompt in free-form text that must end with
//! a `FINAL RANKING:` section listing every label once. [`parse_ranking`]
//! extracts the candidate order from such text;
//! [`RankingSubmission::try_new`] then decides validity: the order must be
//! an exact permutation of the current label set. Anything else — an
//! omitted label, a repeated one, a label that was never assigned — makes
//! the whole submission a failed ranking. Submissions are never repaired.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::model_id::ModelId;
use crate::council::label::Label;

/// Marker line that introduces the machine-readable part of a ranking reply
pub const FINAL_RANKING_MARKER: &str = "FINAL RANKING:";

/// Why a parsed ranking was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("No ranking found in response")]
    Empty,

    #[error("{label} appears more than once")]
    Duplicate { label: Label },

    #[error("{label} is not one of the responses under ranking")]
    Foreign { label: Label },

    #[error("Ranking omits {missing} of {expected} responses")]
    Incomplete { missing: usize, expected: usize },
}

/// One member's validated ranking: a full ordering of the current label set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingSubmission {
    ranker: ModelId,
    order: Vec<Label>,
}

impl RankingSubmission {
    /// Validate a candidate order against the label set under ranking.
    ///
    /// Valid means: every expected label exactly once, nothing else.
    pub fn try_new(
        ranker: ModelId,
        order: Vec<Label>,
        expected: &BTreeSet<Label>,
    ) -> Result<Self, SubmissionError> {
        if order.is_empty() {
            return Err(SubmissionError::Empty);
        }

        let mut seen = BTreeSet::new();
        for label in &order {
            if !expected.contains(label) {
                return Err(SubmissionError::Foreign { label: *label });
            }
            if !seen.insert(*label) {
                return Err(SubmissionError::Duplicate { label: *label });
            }
        }
        if seen.len() != expected.len() {
            return Err(SubmissionError::Incomplete {
                missing: expected.len() - seen.len(),
                expected: expected.len(),
            });
        }

        Ok(Self { ranker, order })
    }

    pub fn ranker(&self) -> &ModelId {
        &self.ranker
    }

    /// Labels from best to worst
    pub fn order(&self) -> &[Label] {
        &self.order
    }
}

/// Extract the ranked label order from a free-form ranking reply.
///
/// Lookup order:
/// 1. the section after the first `FINAL RANKING:` marker, numbered lines
///    only (`1. Response A`);
/// 2. the same section, every `Response X` token in order of appearance;
/// 3. no marker at all: every `Response X` token in the whole text.
///
/// This only extracts a candidate order. Whether it is a usable submission
/// is decided by [`RankingSubmission::try_new`].
pub fn parse_ranking(text: &str) -> Vec<Label> {
    if let Some(pos) = text.find(FINAL_RANKING_MARKER) {
        let section = &text[pos..];

        let numbered: Vec<Label> = section
            .lines()
            .filter(|line| is_numbered_line(line))
            .flat_map(label_tokens)
            .collect();
        if !numbered.is_empty() {
            return numbered;
        }

        return label_tokens(section).collect();
    }

    label_tokens(text).collect()
}

/// Whether a line starts like a numbered list entry (`1.`, ` 12. `)
fn is_numbered_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && trimmed[digits..].starts_with('.')
}

/// All `Response X` tokens in a text, in order of appearance.
///
/// A token is the literal `Response ` followed by a single ASCII uppercase
/// letter with no alphanumeric character right after it, so `Response AB`
/// and `Responses A` do not match.
fn label_tokens(text: &str) -> impl Iterator<Item = Label> + '_ {
    const NEEDLE: &str = "Response ";

    let mut rest = text;
    std::iter::from_fn(move || {
        while let Some(found) = rest.find(NEEDLE) {
            let after = &rest[found + NEEDLE.len()..];
            rest = &rest[found + NEEDLE.len()..];

            let mut chars = after.chars();
            if let Some(letter) = chars.next() {
                let followed_by = chars.next();
                let boundary = !followed_by.is_some_and(|c| c.is_ascii_alphanumeric());
                if letter.is_ascii_uppercase() && boundary {
                    return Label::nth((letter as u8 - b'A') as usize);
                }
            }
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(letters: &str) -> Vec<Label> {
        letters
            .chars()
            .map(|c| c.to_string().parse().unwrap())
            .collect()
    }

    fn label_set(letters: &str) -> BTreeSet<Label> {
        labels(letters).into_iter().collect()
    }

    #[test]
    fn parse_numbered_final_ranking() {
        let text = "Response A is thorough. Response B is shallow.\n\n\
                    FINAL RANKING:\n1. Response B\n2. Response A\n3. Response C\n";
        assert_eq!(parse_ranking(text), labels("BAC"));
    }

    #[test]
    fn parse_prefers_numbered_lines_over_chatter() {
        // Mentions of labels after the numbered list must not leak in.
        let text = "FINAL RANKING:\n1. Response C\n2. Response A\n2 is close.\n\
                    Overall Response A was nearly as good as Response C.";
        assert_eq!(parse_ranking(text), labels("CA"));
    }

    #[test]
    fn parse_falls_back_to_tokens_in_section() {
        let text = "FINAL RANKING:\nResponse B, then Response A, then Response C";
        assert_eq!(parse_ranking(text), labels("BAC"));
    }

    #[test]
    fn parse_without_marker_scans_whole_text() {
        let text = "Best is Response C, worst is Response A. Response B sits between.";
        assert_eq!(parse_ranking(text), labels("CAB"));
    }

    #[test]
    fn parse_ignores_multi_letter_and_lowercase() {
        let text = "FINAL RANKING:\nResponse AB then Response a then Response B2 then Response C";
        assert_eq!(parse_ranking(text), labels("C"));
    }

    #[test]
    fn parse_token_at_end_of_text() {
        assert_eq!(parse_ranking("The best was Response D"), labels("D"));
    }

    #[test]
    fn parse_empty_text() {
        assert!(parse_ranking("").is_empty());
        assert!(parse_ranking("no labels here").is_empty());
    }

    #[test]
    fn numbered_line_detection() {
        assert!(is_numbered_line("1. Response A"));
        assert!(is_numbered_line("  12. Response B"));
        assert!(!is_numbered_line("Response A"));
        assert!(!is_numbered_line("1) Response A"));
        assert!(!is_numbered_line(""));
    }

    #[test]
    fn valid_permutation_accepted() {
        let submission = RankingSubmission::try_new(
            ModelId::new("m/ranker"),
            labels("CAB"),
            &label_set("ABC"),
        )
        .unwrap();
        assert_eq!(submission.order(), &labels("CAB")[..]);
        assert_eq!(submission.ranker().as_str(), "m/ranker");
    }

    #[test]
    fn omitted_label_rejected() {
        let err = RankingSubmission::try_new(
            ModelId::new("m/r"),
            labels("AB"),
            &label_set("ABC"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SubmissionError::Incomplete {
                missing: 1,
                expected: 3
            }
        );
    }

    #[test]
    fn duplicate_label_rejected() {
        let err = RankingSubmission::try_new(
            ModelId::new("m/r"),
            labels("ABA"),
            &label_set("ABC"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SubmissionError::Duplicate {
                label: "A".parse().unwrap()
            }
        );
    }

    #[test]
    fn foreign_label_rejected() {
        let err = RankingSubmission::try_new(
            ModelId::new("m/r"),
            labels("ABD"),
            &label_set("ABC"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SubmissionError::Foreign {
                label: "D".parse().unwrap()
            }
        );
    }

    #[test]
    fn empty_order_rejected() {
        let err =
            RankingSubmission::try_new(ModelId::new("m/r"), vec![], &label_set("AB")).unwrap_err();
        assert_eq!(err, SubmissionError::Empty);
    }

    #[test]
    fn random_permutations_always_validate() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;
        use rand::seq::SliceRandom;

        let expected = label_set("ABCDEF");
        let mut rng = StdRng::seed_from_u64(1234);
        for _ in 0..100 {
            let mut order: Vec<Label> = expected.iter().copied().collect();
            order.shuffle(&mut rng);
            assert!(
                RankingSubmission::try_new(ModelId::new("m/r"), order, &expected).is_ok()
            );
        }
    }
}
