use serde::{Deserialize, Serialize};

use super::expense::ExpenseSnapshot;

/// A labeled outcome fed to the learner: what we predicted (if anything)
/// and what the user said was right. Consumed once, may be buffered in a
/// batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionEvent {
    /// The expense as it was when categorized.
    pub expense: ExpenseSnapshot,
    /// What the system predicted, None when it abstained.
    pub predicted_category: Option<String>,
    /// The category the user confirmed.
    pub correct_category: String,
}

impl CorrectionEvent {
    pub fn new(
        expense: ExpenseSnapshot,
        predicted_category: Option<String>,
        correct_category: &str,
    ) -> Self {
        Self {
            expense,
            predicted_category,
            correct_category: correct_category.to_string(),
        }
    }

    /// Whether the prediction existed and was wrong.
    pub fn was_misprediction(&self) -> bool {
        self.predicted_category
            .as_deref()
            .is_some_and(|p| p != self.correct_category)
    }
}
