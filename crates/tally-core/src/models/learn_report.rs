use serde::{Deserialize, Serialize};

/// What one applied correction did to the pattern set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearnOutcome {
    /// Pattern IDs that recorded a failure (misprediction).
    pub penalized: Vec<String>,
    /// Pattern ID that recorded the success, if one existed or was created.
    pub reinforced: Option<String>,
    /// True when a brand-new pattern was materialized this call.
    pub created: bool,
    /// Pattern IDs retired by merge or the retirement rule.
    pub retired: Vec<String>,
    /// Pattern IDs that absorbed a sibling in a merge.
    pub merged_into: Vec<String>,
}

/// Result of a batch learn: per-item isolation, never throws for a bad
/// item. The atomicity guarantee covers the validated remainder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchLearnReport {
    /// Number of corrections applied.
    pub applied: usize,
    /// (input index, reason) for every skipped correction.
    pub skipped: Vec<(usize, String)>,
    /// Patterns created across the batch.
    pub created: usize,
    /// Patterns retired across the batch.
    pub retired: usize,
    /// Merges performed across the batch.
    pub merged: usize,
}

impl BatchLearnReport {
    /// Fold one correction's outcome into the batch totals.
    pub fn absorb(&mut self, outcome: &LearnOutcome) {
        self.applied += 1;
        if outcome.created {
            self.created += 1;
        }
        self.retired += outcome.retired.len();
        self.merged += outcome.merged_into.len();
    }

    pub fn skip(&mut self, index: usize, reason: String) {
        self.skipped.push((index, reason));
    }
}
