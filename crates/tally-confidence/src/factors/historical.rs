use tally_core::pattern::Pattern;

/// Historical accuracy factor.
///
/// The pattern's lifetime success rate, but only once it has been used
/// more than `min_usage` times — a pattern that matched twice and stuck
/// twice has a perfect rate and no evidence behind it.
pub fn calculate(pattern: &Pattern, min_usage: u64) -> Option<f64> {
    if pattern.usage_count > min_usage {
        Some(pattern.success_rate())
    } else {
        None
    }
}
