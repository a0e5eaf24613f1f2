use chrono::{DateTime, Utc};

use tally_core::pattern::Pattern;

/// Temporal fit factor.
///
/// How close the transaction's hour and weekday sit to the pattern's
/// recorded signature. `None` until the pattern has observed at least one
/// timestamp.
pub fn calculate(at: DateTime<Utc>, pattern: &Pattern) -> Option<f64> {
    pattern.metadata.temporal.as_ref()?.closeness(at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tally_core::pattern::PatternType;

    #[test]
    fn excluded_without_signature() {
        let p = Pattern::new("cat", PatternType::Merchant, "starbucks");
        let at = Utc.with_ymd_and_hms(2026, 3, 2, 8, 15, 0).unwrap();
        assert_eq!(calculate(at, &p), None);
    }

    #[test]
    fn observed_slot_scores_above_unseen_slot() {
        let mut p = Pattern::new("cat", PatternType::Merchant, "starbucks");
        let morning = Utc.with_ymd_and_hms(2026, 3, 2, 8, 15, 0).unwrap();
        for _ in 0..10 {
            p.metadata.observe_time(morning);
        }
        let midnight = Utc.with_ymd_and_hms(2026, 3, 7, 0, 5, 0).unwrap();
        let at_peak = calculate(morning, &p).unwrap();
        let off_peak = calculate(midnight, &p).unwrap();
        assert!(at_peak > off_peak, "{at_peak} <= {off_peak}");
    }
}
