use tracing::debug;

use tally_core::config::ConfidenceConfig;
use tally_core::errors::MatchError;
use tally_core::models::{ConfidenceBreakdown, ExpenseSnapshot, MatchResult};
use tally_core::pattern::Pattern;
use tally_core::{TallyConfig, TallyResult};

use crate::formula;

/// Scores how strongly an already-matched pattern supports a category.
///
/// Pure and deterministic: same expense, pattern and match result always
/// produce the same score. The calculator never mutates the pattern, never
/// touches storage, and fails only on the one programmer error it can
/// detect — being asked for confidence without a match.
#[derive(Debug, Clone)]
pub struct ConfidenceCalculator {
    config: ConfidenceConfig,
}

impl ConfidenceCalculator {
    pub fn new(config: &TallyConfig) -> Self {
        Self {
            config: config.confidence.clone(),
        }
    }

    /// Score one candidate. `match_result` is mandatory: text similarity is
    /// the anchor factor and cannot be imputed.
    pub fn calculate(
        &self,
        expense: &ExpenseSnapshot,
        pattern: &Pattern,
        match_result: Option<&MatchResult>,
    ) -> TallyResult<(f64, ConfidenceBreakdown)> {
        let result = match_result.ok_or_else(|| MatchError::Precondition {
            reason: format!(
                "confidence requested for pattern {} without a match result",
                pattern.id
            ),
        })?;

        let breakdown = formula::compute_breakdown(expense, result, &self.config);
        debug!(
            pattern_id = %pattern.id,
            category_id = %pattern.category_id,
            confidence = breakdown.final_score,
            factors = breakdown.factors.len(),
            "confidence computed"
        );
        Ok((breakdown.final_score, breakdown))
    }

    /// The threshold a score must clear before the engine returns a
    /// category at all.
    pub fn accept_threshold(&self) -> f64 {
        self.config.accept_threshold
    }
}
