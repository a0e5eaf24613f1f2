//! End-to-end confidence scenarios.

use chrono::{TimeZone, Utc};

use tally_confidence::ConfidenceCalculator;
use tally_core::models::{ExpenseSnapshot, MatchAlgorithm, MatchResult, MatchType};
use tally_core::pattern::{Pattern, PatternType};
use tally_core::TallyConfig;

fn morning_coffee() -> ExpenseSnapshot {
    let at = Utc.with_ymd_and_hms(2026, 3, 2, 8, 15, 0).unwrap();
    ExpenseSnapshot::new("STARBUCKS #1234 SEATTLE WA", "card purchase", 5.75, at)
}

#[test]
fn proven_merchant_pattern_scores_confidently() {
    // A pattern with a year of history: strong text hit, 70% success rate,
    // familiar amount, familiar time of day.
    let mut pattern = Pattern::new("cat-coffee", PatternType::Merchant, "starbucks");
    pattern.usage_count = 120;
    pattern.success_count = 84;
    for _ in 0..20 {
        pattern.metadata.observe_amount(5.50);
        pattern
            .metadata
            .observe_time(Utc.with_ymd_and_hms(2026, 2, 2, 8, 0, 0).unwrap());
    }

    let result = MatchResult::new(pattern.clone(), 1.0, MatchAlgorithm::Exact, MatchType::Exact);
    let calc = ConfidenceCalculator::new(&TallyConfig::default());
    let (confidence, breakdown) = calc
        .calculate(&morning_coffee(), &pattern, Some(&result))
        .unwrap();

    assert!(confidence >= 0.8, "confidence = {confidence}");
    assert_eq!(breakdown.factors.len(), 5, "all five factors had data");
}

#[test]
fn weak_text_hit_on_an_unproven_pattern_stays_uncertain() {
    let pattern = Pattern::new("cat-misc", PatternType::Keyword, "store");
    let result = MatchResult::new(
        pattern.clone(),
        0.55,
        MatchAlgorithm::Combined,
        MatchType::Fuzzy,
    );
    let calc = ConfidenceCalculator::new(&TallyConfig::default());
    let (confidence, _) = calc
        .calculate(&morning_coffee(), &pattern, Some(&result))
        .unwrap();

    assert!(
        confidence < calc.accept_threshold(),
        "confidence = {confidence}"
    );
}

#[test]
fn breakdown_names_every_included_factor() {
    let mut pattern = Pattern::new("cat-coffee", PatternType::Merchant, "starbucks");
    pattern.usage_count = 30;
    pattern.success_count = 24;

    let result = MatchResult::new(
        pattern.clone(),
        0.9,
        MatchAlgorithm::JaroWinkler,
        MatchType::Fuzzy,
    );
    let calc = ConfidenceCalculator::new(&TallyConfig::default());
    let (_, breakdown) = calc
        .calculate(&morning_coffee(), &pattern, Some(&result))
        .unwrap();

    let names: Vec<&str> = breakdown.factors.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec!["historical_accuracy", "text_match", "usage_frequency"]
    );
}
