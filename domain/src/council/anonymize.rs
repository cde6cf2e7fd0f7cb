//! Response anonymization for the peer-ranking stage
//!
//! Rankings are only meaningful if members cannot tell whose response they
//! are judging. Before the ranking stage, surviving responses are stripped
//! of attribution and labeled `Response A`, `Response B`, ... in a
//! randomized order, so neither the label nor the position in the prompt
//! encodes which model wrote what. The label-to-model mapping stays sealed
//! inside the [`LabelMap`] until aggregation is done.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::core::error::DomainError;
use crate::core::model_id::ModelId;
use crate::council::label::Label;

/// One response as the ranking stage sees it: label and text, nothing else.
///
/// The originating model is deliberately not reachable from outside this
/// crate; disclosure happens through the [`LabelMap`] after aggregation.
#[derive(Debug, Clone)]
pub struct AnonymizedResponse {
    pub label: Label,
    pub text: String,
    source: ModelId,
}

impl AnonymizedResponse {
    pub(crate) fn source(&self) -> &ModelId {
        &self.source
    }
}

/// The sealed label-to-model assignment for one council run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelMap(BTreeMap<Label, ModelId>);

impl LabelMap {
    pub fn model_for(&self, label: &Label) -> Option<&ModelId> {
        self.0.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Label, &ModelId)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Assigns randomized anonymous labels to surviving responses.
///
/// The permutation is drawn from a seedable RNG so tests can pin the
/// assignment; production use seeds from entropy.
#[derive(Debug)]
pub struct Anonymizer {
    rng: StdRng,
}

impl Anonymizer {
    /// Entropy-seeded anonymizer for production runs
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic anonymizer for tests and replayable runs
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Label the given `(model, response_text)` pairs in randomized order.
    ///
    /// Returns the labeled responses sorted by label, plus the sealed
    /// label-to-model assignment. Fails only when there are more responses
    /// than labels.
    pub fn assign(
        &mut self,
        responses: Vec<(ModelId, String)>,
    ) -> Result<(Vec<AnonymizedResponse>, LabelMap), DomainError> {
        let labels = Label::sequence(responses.len())?;

        let mut shuffled = responses;
        shuffled.shuffle(&mut self.rng);

        let mut anonymized = Vec::with_capacity(shuffled.len());
        let mut map = BTreeMap::new();
        for (label, (model, text)) in labels.into_iter().zip(shuffled) {
            map.insert(label, model.clone());
            anonymized.push(AnonymizedResponse {
                label,
                text,
                source: model,
            });
        }

        Ok((anonymized, LabelMap(map)))
    }
}

impl Default for Anonymizer {
    fn default() -> Self {
        Self::new()
    }
}
