use tally_core::models::MatchResult;

/// Text similarity factor.
///
/// The only mandatory factor: it is the raw similarity the matcher already
/// produced, carried over unchanged. Exact and regex hits arrive as 1.0.
pub fn calculate(result: &MatchResult) -> f64 {
    result.raw_score
}
