use chrono::Utc;
use proptest::prelude::*;
use tally_core::pattern::{Pattern, PatternType, Weight};

fn arb_pattern_type() -> impl Strategy<Value = PatternType> {
    prop_oneof![
        Just(PatternType::Merchant),
        Just(PatternType::Keyword),
        Just(PatternType::Description),
    ]
}

// Invariant: success_count <= usage_count after any mutation sequence, and
// success_rate stays in [0, 1].

proptest! {
    #[test]
    fn counters_stay_consistent(
        outcomes in prop::collection::vec(any::<bool>(), 0..200),
        pattern_type in arb_pattern_type(),
    ) {
        let mut pattern = Pattern::new("cat-1", pattern_type, "some merchant");
        let now = Utc::now();
        for success in &outcomes {
            if *success {
                pattern.record_success(now);
            } else {
                pattern.record_failure(now);
            }
        }
        prop_assert!(pattern.success_count <= pattern.usage_count);
        let rate = pattern.success_rate();
        prop_assert!((0.0..=1.0).contains(&rate));
        if pattern.usage_count == 0 {
            prop_assert_eq!(rate, 0.0);
        }
    }
}

proptest! {
    #[test]
    fn merge_conserves_usage_history(
        a_successes in 0u64..100,
        a_failures in 0u64..100,
        b_successes in 0u64..100,
        b_failures in 0u64..100,
    ) {
        let now = Utc::now();
        let mut a = Pattern::new("cat-1", PatternType::Merchant, "starbucks");
        let mut b = Pattern::new("cat-1", PatternType::Merchant, "starbucks coffee");
        for _ in 0..a_successes { a.record_success(now); }
        for _ in 0..a_failures { a.record_failure(now); }
        for _ in 0..b_successes { b.record_success(now); }
        for _ in 0..b_failures { b.record_failure(now); }

        let total_usage = a.usage_count + b.usage_count;
        let total_success = a.success_count + b.success_count;
        a.absorb(&b, now);
        prop_assert_eq!(a.usage_count, total_usage);
        prop_assert_eq!(a.success_count, total_success);
        prop_assert!(a.success_count <= a.usage_count);
    }
}

proptest! {
    #[test]
    fn weight_decay_never_increases_or_goes_negative(
        start in 0.0f64..=1.0,
        steps in 0usize..100,
    ) {
        let mut weight = Weight::new(start);
        for _ in 0..steps {
            let next = weight.decayed(0.9);
            prop_assert!(next.value() <= weight.value() + f64::EPSILON);
            prop_assert!(next.value() >= 0.0);
            weight = next;
        }
    }
}

proptest! {
    #[test]
    fn quality_score_is_bounded(
        successes in 0u64..1000,
        failures in 0u64..1000,
    ) {
        let now = Utc::now();
        let mut pattern = Pattern::new("cat-1", PatternType::Keyword, "coffee");
        for _ in 0..successes { pattern.record_success(now); }
        for _ in 0..failures { pattern.record_failure(now); }
        let q = pattern.quality_score();
        prop_assert!((0.0..=100.0).contains(&q));
    }
}
