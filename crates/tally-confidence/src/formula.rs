use tally_core::config::ConfidenceConfig;
use tally_core::models::{ConfidenceBreakdown, ExpenseSnapshot, MatchResult};

use crate::factors;

/// Weighted-mean-then-squash confidence formula.
///
/// ```text
/// blended = Σ(score_i × weight_i) / Σ(weight_i)   over present factors
/// confidence = 1 / (1 + e^(-k·(blended - 0.5)))
/// ```
///
/// Absent factors contribute to neither sum: a pattern with no amount
/// history is scored on the evidence that exists, not diluted by zeros.
/// The logistic squash (steepness `k`, default 10) pushes middling blends
/// toward uncertainty and strong ones toward conviction; the output never
/// reaches exactly 0.0 or 1.0.
pub fn compute(expense: &ExpenseSnapshot, result: &MatchResult, cfg: &ConfidenceConfig) -> f64 {
    compute_breakdown(expense, result, cfg).final_score
}

/// Same computation, keeping every included factor for audit output.
pub fn compute_breakdown(
    expense: &ExpenseSnapshot,
    result: &MatchResult,
    cfg: &ConfidenceConfig,
) -> ConfidenceBreakdown {
    let pattern = &result.pattern;
    let mut breakdown = ConfidenceBreakdown::default();

    breakdown.add(factors::TEXT, factors::text::calculate(result), cfg.text_weight);
    if let Some(score) = factors::historical::calculate(pattern, cfg.historical_min_usage) {
        breakdown.add(factors::HISTORICAL, score, cfg.historical_weight);
    }
    if let Some(score) = factors::frequency::calculate(pattern) {
        breakdown.add(factors::FREQUENCY, score, cfg.frequency_weight);
    }
    if let Some(score) = factors::amount::calculate(expense.amount, pattern) {
        breakdown.add(factors::AMOUNT, score, cfg.amount_weight);
    }
    if let Some(score) = factors::temporal::calculate(expense.transaction_time, pattern) {
        breakdown.add(factors::TEMPORAL, score, cfg.temporal_weight);
    }

    let weighted: f64 = breakdown
        .factors
        .values()
        .map(|f| f.score * f.weight)
        .sum();
    let total = breakdown.total_weight();
    let blended = if total > 0.0 { weighted / total } else { 0.0 };

    breakdown.final_score = squash(blended, cfg.logistic_steepness);
    breakdown
}

/// Logistic squash centered at 0.5. Strictly increasing, output in (0, 1).
pub fn squash(x: f64, steepness: f64) -> f64 {
    1.0 / (1.0 + (-steepness * (x - 0.5)).exp())
}
