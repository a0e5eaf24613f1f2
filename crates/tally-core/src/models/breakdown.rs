use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One factor's contribution to a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    /// The factor's own score in [0.0, 1.0].
    pub score: f64,
    /// The weight it carried in the combination.
    pub weight: f64,
}

/// Explainable breakdown of one confidence calculation: factor name →
/// contribution, plus the combined final score. Ephemeral, owned by the
/// CategorizationResult that contains it.
///
/// BTreeMap keeps factor ordering stable for audit output and tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    pub factors: BTreeMap<String, FactorContribution>,
    pub final_score: f64,
}

impl ConfidenceBreakdown {
    /// Record one included factor.
    pub fn add(&mut self, name: &str, score: f64, weight: f64) {
        self.factors
            .insert(name.to_string(), FactorContribution { score, weight });
    }

    /// Sum of the weights that were actually included.
    pub fn total_weight(&self) -> f64 {
        self.factors.values().map(|f| f.weight).sum()
    }
}
