//! Rank aggregation across peer submissions
//!
//! Valid submissions are combined by Borda count: in a ranking over N
//! labels, first place is worth N-1 points, second N-2, down to 0 for last.
//! Points sum across submissions and the consensus order is descending by
//! total score. Ties break by alphabetic label order, so the outcome is a
//! pure function of the submissions — arrival order never matters.
//!
//! Aggregation is also where anonymity ends: the sealed label-to-model
//! assignment is attached to the result for disclosure.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::model_id::ModelId;
use crate::council::anonymize::LabelMap;
use crate::council::label::Label;
use crate::council::ranking::RankingSubmission;

/// One label's aggregate position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelStanding {
    pub label: Label,
    /// Total Borda points across all valid submissions
    pub score: u64,
    /// How many valid submissions ranked this label
    pub rankings_count: usize,
}

/// The council's consensus ordering with attribution disclosed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRanking {
    /// Best first: descending score, ties in alphabetic label order
    standings: Vec<LabelStanding>,
    /// The label-to-model assignment, revealed now that ranking is over
    label_to_model: LabelMap,
}

impl AggregateRanking {
    /// Score `submissions` over `labels` and disclose the assignment.
    ///
    /// Callers pass only validated submissions; each is a permutation of
    /// `labels`, so every label scores in every submission.
    pub fn from_submissions(
        submissions: &[RankingSubmission],
        labels: &BTreeSet<Label>,
        label_to_model: LabelMap,
    ) -> Self {
        let top_score = labels.len().saturating_sub(1) as u64;

        let mut scores: BTreeMap<Label, (u64, usize)> =
            labels.iter().map(|label| (*label, (0, 0))).collect();
        for submission in submissions {
            for (position, label) in submission.order().iter().enumerate() {
                if let Some((score, count)) = scores.get_mut(label) {
                    *score += top_score.saturating_sub(position as u64);
                    *count += 1;
                }
            }
        }

        // BTreeMap iteration is alphabetic; the stable sort keeps that
        // order within equal scores.
        let mut standings: Vec<LabelStanding> = scores
            .into_iter()
            .map(|(label, (score, rankings_count))| LabelStanding {
                label,
                score,
                rankings_count,
            })
            .collect();
        standings.sort_by(|a, b| b.score.cmp(&a.score));

        Self {
            standings,
            label_to_model,
        }
    }

    /// Standings, best first
    pub fn standings(&self) -> &[LabelStanding] {
        &self.standings
    }

    /// The consensus label order, best first
    pub fn order(&self) -> impl Iterator<Item = &Label> {
        self.standings.iter().map(|s| &s.label)
    }

    /// The model behind a label, now that the assignment is disclosed
    pub fn model_for(&self, label: &Label) -> Option<&ModelId> {
        self.label_to_model.model_for(label)
    }

    pub fn label_map(&self) -> &LabelMap {
        &self.label_to_model
    }

    /// The model whose response the council ranked highest
    pub fn winner(&self) -> Option<&ModelId> {
        self.standings
            .first()
            .and_then(|s| self.label_to_model.model_for(&s.label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::council::anonymize::Anonymizer;

    fn labels(letters: &str) -> Vec<Label> {
        letters
            .chars()
            .map(|c| c.to_string().parse().unwrap())
            .collect()
    }

    fn label_set(letters: &str) -> BTreeSet<Label> {
        labels(letters).into_iter().collect()
    }

    fn submission(letters: &str, expected: &BTreeSet<Label>) -> RankingSubmission {
        RankingSubmission::try_new(
            ModelId::new(format!("ranker/{}", letters.to_lowercase())),
            labels(letters),
            expected,
        )
        .unwrap()
    }

    fn map_for(letters: &str) -> LabelMap {
        let responses = letters
            .chars()
            .map(|c| (ModelId::new(format!("m/{c}")), format!("text {c}")))
            .collect();
        // Seed 0 only fixes the assignment; tests here never read it back
        // except through the aggregate.
        let (_, map) = Anonymizer::with_seed(0).assign(responses).unwrap();
        map
    }

    #[test]
    fn borda_scores_sum_across_submissions() {
        let expected = label_set("ABC");
        let submissions = vec![
            submission("ABC", &expected),
            submission("ACB", &expected),
            submission("BAC", &expected),
        ];

        let aggregate =
            AggregateRanking::from_submissions(&submissions, &expected, map_for("ABC"));

        let by_label: BTreeMap<char, u64> = aggregate
            .standings()
            .iter()
            .map(|s| (s.label.letter(), s.score))
            .collect();
        assert_eq!(by_label[&'A'], 5);
        assert_eq!(by_label[&'B'], 3);
        assert_eq!(by_label[&'C'], 1);

        let order: Vec<char> = aggregate.order().map(|l| l.letter()).collect();
        assert_eq!(order, vec!['A', 'B', 'C']);
    }

    #[test]
    fn ties_break_alphabetically() {
        let expected = label_set("AB");
        // A first then B first: both end with 1 point.
        let submissions = vec![submission("AB", &expected), submission("BA", &expected)];

        let aggregate =
            AggregateRanking::from_submissions(&submissions, &expected, map_for("AB"));

        let order: Vec<char> = aggregate.order().map(|l| l.letter()).collect();
        assert_eq!(order, vec!['A', 'B']);
        assert!(aggregate.standings().iter().all(|s| s.score == 1));
    }

    #[test]
    fn submission_arrival_order_is_irrelevant() {
        let expected = label_set("ABCD");
        let mut submissions = vec![
            submission("BACD", &expected),
            submission("CABD", &expected),
            submission("BCAD", &expected),
        ];

        let forward =
            AggregateRanking::from_submissions(&submissions, &expected, map_for("ABCD"));
        submissions.reverse();
        let reversed =
            AggregateRanking::from_submissions(&submissions, &expected, map_for("ABCD"));

        assert_eq!(forward.standings(), reversed.standings());
    }

    #[test]
    fn single_submission_degenerates_to_its_order() {
        let expected = label_set("ABC");
        let submissions = vec![submission("CAB", &expected)];

        let aggregate =
            AggregateRanking::from_submissions(&submissions, &expected, map_for("ABC"));

        let order: Vec<char> = aggregate.order().map(|l| l.letter()).collect();
        assert_eq!(order, vec!['C', 'A', 'B']);
    }

    #[test]
    fn rankings_count_tracks_submissions() {
        let expected = label_set("AB");
        let submissions = vec![submission("AB", &expected), submission("AB", &expected)];

        let aggregate =
            AggregateRanking::from_submissions(&submissions, &expected, map_for("AB"));
        assert!(aggregate.standings().iter().all(|s| s.rankings_count == 2));
    }

    #[test]
    fn winner_is_disclosed_model() {
        let expected = label_set("AB");
        let submissions = vec![submission("AB", &expected)];
        let map = map_for("AB");
        let top_model = map.model_for(&"A".parse().unwrap()).unwrap().clone();

        let aggregate = AggregateRanking::from_submissions(&submissions, &expected, map);
        assert_eq!(aggregate.winner(), Some(&top_model));
    }

    #[test]
    fn serializes_with_disclosed_map() {
        let expected = label_set("AB");
        let submissions = vec![submission("AB", &expected)];
        let aggregate =
            AggregateRanking::from_submissions(&submissions, &expected, map_for("AB"));

        let json = serde_json::to_value(&aggregate).unwrap();
        assert!(json["label_to_model"]["Response A"].is_string());
        assert_eq!(json["standings"][0]["label"], "Response A");
    }
}
