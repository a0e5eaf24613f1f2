//! Property tests for the confidence formula.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use tally_confidence::{formula, ConfidenceCalculator};
use tally_core::models::{ExpenseSnapshot, MatchAlgorithm, MatchResult, MatchType};
use tally_core::pattern::{Pattern, PatternType};
use tally_core::TallyConfig;

fn arb_pattern() -> impl Strategy<Value = Pattern> {
    (0u64..10_000, 0.0f64..=1.0, proptest::option::of(0.01f64..10_000.0)).prop_map(
        |(usage, rate, typical)| {
            let mut p = Pattern::new("cat", PatternType::Merchant, "starbucks");
            p.usage_count = usage;
            p.success_count = (usage as f64 * rate) as u64;
            if let Some(t) = typical {
                p.metadata.observe_amount(t);
            }
            p
        },
    )
}

fn expense(amount: f64) -> ExpenseSnapshot {
    let at = Utc.with_ymd_and_hms(2026, 3, 2, 8, 15, 0).unwrap();
    ExpenseSnapshot::new("STARBUCKS #1234 SEATTLE WA", "", amount, at)
}

proptest! {
    #[test]
    fn confidence_stays_in_open_unit_interval(
        pattern in arb_pattern(),
        score in 0.0f64..=1.0,
        amount in 0.01f64..10_000.0,
    ) {
        let result = MatchResult::new(
            pattern.clone(),
            score,
            MatchAlgorithm::Combined,
            MatchType::Fuzzy,
        );
        let calc = ConfidenceCalculator::new(&TallyConfig::default());
        let (confidence, breakdown) = calc
            .calculate(&expense(amount), &pattern, Some(&result))
            .unwrap();
        prop_assert!(confidence > 0.0 && confidence < 1.0);
        for contribution in breakdown.factors.values() {
            prop_assert!(contribution.score >= 0.0 && contribution.score <= 1.0);
        }
    }

    #[test]
    fn identical_inputs_are_deterministic(
        pattern in arb_pattern(),
        score in 0.0f64..=1.0,
    ) {
        let result = MatchResult::new(
            pattern.clone(),
            score,
            MatchAlgorithm::Combined,
            MatchType::Fuzzy,
        );
        let calc = ConfidenceCalculator::new(&TallyConfig::default());
        let (a, _) = calc.calculate(&expense(5.0), &pattern, Some(&result)).unwrap();
        let (b, _) = calc.calculate(&expense(5.0), &pattern, Some(&result)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn squash_is_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(formula::squash(lo, 10.0) <= formula::squash(hi, 10.0));
    }

    #[test]
    fn higher_text_score_never_lowers_confidence(
        pattern in arb_pattern(),
        lo in 0.0f64..=1.0,
        hi in 0.0f64..=1.0,
    ) {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let calc = ConfidenceCalculator::new(&TallyConfig::default());
        let make = |s: f64| {
            MatchResult::new(pattern.clone(), s, MatchAlgorithm::Combined, MatchType::Fuzzy)
        };
        let (weak, _) = calc
            .calculate(&expense(5.0), &pattern, Some(&make(lo)))
            .unwrap();
        let (strong, _) = calc
            .calculate(&expense(5.0), &pattern, Some(&make(hi)))
            .unwrap();
        prop_assert!(strong >= weak);
    }
}
