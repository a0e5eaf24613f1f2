/// Matching and scoring errors.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// Programmer error: a required input was missing. Surfaced immediately,
    /// never retried.
    #[error("precondition failed: {reason}")]
    Precondition { reason: String },

    /// Regex evaluation exceeded its budget. The candidate is skipped, the
    /// categorization continues.
    #[error("regex evaluation for pattern {pattern_id} exceeded {budget_ms}ms budget")]
    Timeout { pattern_id: String, budget_ms: u64 },

    #[error("pattern {pattern_id} carries an uncompilable regex: {reason}")]
    BadRegex { pattern_id: String, reason: String },
}
