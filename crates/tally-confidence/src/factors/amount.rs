use tally_core::pattern::Pattern;

/// Amount similarity factor.
///
/// Formula: `exp(-|log10(amount + 1) - log10(typical + 1)|)`.
///
/// Log-space distance treats $4.50 vs $5.20 as close and $4.50 vs $450 as
/// far, independent of scale. `None` until the pattern has observed at
/// least one amount.
pub fn calculate(amount: f64, pattern: &Pattern) -> Option<f64> {
    let typical = pattern.metadata.typical_amount?;
    if !amount.is_finite() || amount < 0.0 || typical < 0.0 {
        return None;
    }
    let distance = ((amount + 1.0).log10() - (typical + 1.0).log10()).abs();
    Some((-distance).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::pattern::PatternType;

    fn with_typical(typical: f64) -> Pattern {
        let mut p = Pattern::new("cat", PatternType::Merchant, "starbucks");
        p.metadata.observe_amount(typical);
        p
    }

    #[test]
    fn excluded_without_amount_history() {
        let p = Pattern::new("cat", PatternType::Merchant, "starbucks");
        assert_eq!(calculate(5.0, &p), None);
    }

    #[test]
    fn identical_amounts_score_one() {
        let score = calculate(5.75, &with_typical(5.75)).unwrap();
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn nearby_amounts_score_high_distant_low() {
        let near = calculate(5.20, &with_typical(4.50)).unwrap();
        let far = calculate(450.0, &with_typical(4.50)).unwrap();
        assert!(near > 0.9, "near = {near}");
        assert!(far < 0.2, "far = {far}");
    }

    #[test]
    fn rejects_non_finite_input() {
        assert_eq!(calculate(f64::NAN, &with_typical(5.0)), None);
        assert_eq!(calculate(f64::INFINITY, &with_typical(5.0)), None);
    }
}
