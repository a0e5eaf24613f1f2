use tally_core::pattern::Pattern;

/// Usage frequency factor.
///
/// Formula: `min(1.0, log10(usage_count + 1) / 4)`.
///
/// Saturates at 9 999 uses; a never-used pattern scores 0.0 rather than
/// being excluded, because "no uses yet" is itself evidence.
pub fn calculate(pattern: &Pattern) -> Option<f64> {
    let score = ((pattern.usage_count as f64 + 1.0).log10() / 4.0).min(1.0);
    Some(score)
}
