//! Batch corrections: validate first, then apply the valid remainder under
//! one store transaction.

use tracing::warn;

use tally_core::errors::LearningError;
use tally_core::models::{BatchLearnReport, CorrectionEvent};
use tally_core::{TallyError, TallyResult};
use tally_match::normalize::normalize;

use crate::learner::PatternLearner;

/// Structural checks on one correction. Returns the reason it cannot be
/// applied, if any.
pub fn validate_correction(event: &CorrectionEvent) -> Result<(), String> {
    if normalize(event.expense.primary_text()).is_empty() {
        return Err("expense has no usable merchant or description text".to_string());
    }
    if !event.expense.amount.is_finite() || event.expense.amount < 0.0 {
        return Err(format!("amount {} is not usable", event.expense.amount));
    }
    if event.correct_category.trim().is_empty() {
        return Err("correct_category is empty".to_string());
    }
    Ok(())
}

impl PatternLearner {
    /// Apply a batch of corrections. Malformed items are skipped with a
    /// recorded reason; the valid remainder is applied inside one store
    /// transaction, rolled back together if any of it fails.
    pub fn apply_batch(&self, events: &[CorrectionEvent]) -> TallyResult<BatchLearnReport> {
        if events.len() > self.config.max_batch_size {
            return Err(TallyError::Learning(LearningError::BatchTooLarge {
                size: events.len(),
                max: self.config.max_batch_size,
            }));
        }

        let mut report = BatchLearnReport::default();
        let mut valid = Vec::with_capacity(events.len());
        for (index, event) in events.iter().enumerate() {
            match validate_correction(event) {
                Ok(()) => valid.push(event),
                Err(reason) => {
                    warn!(index, %reason, "skipping malformed correction");
                    report.skip(index, reason);
                }
            }
        }

        self.store().begin_batch()?;
        for event in valid {
            match self.apply_correction(event) {
                Ok(outcome) => report.absorb(&outcome),
                Err(e) => {
                    self.store().rollback_batch()?;
                    return Err(e);
                }
            }
        }
        self.store().commit_batch()?;
        Ok(report)
    }
}
