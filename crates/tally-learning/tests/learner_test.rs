//! PatternLearner integration tests against the in-memory store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use tally_cache::PatternCache;
use tally_core::config::CacheConfig;
use tally_core::constants::DEFAULT_SCOPE;
use tally_core::errors::{LearningError, StoreError};
use tally_core::models::{CorrectionEvent, ExpenseSnapshot};
use tally_core::pattern::{Pattern, PatternType};
use tally_core::traits::IPatternStore;
use tally_core::{TallyConfig, TallyError, TallyResult};
use tally_learning::PatternLearner;
use tally_storage::MemoryPatternStore;

struct Fixture {
    store: Arc<MemoryPatternStore>,
    learner: PatternLearner,
}

fn fixture() -> Fixture {
    fixture_with(TallyConfig::default())
}

fn fixture_with(config: TallyConfig) -> Fixture {
    let store = Arc::new(MemoryPatternStore::new());
    let cache = Arc::new(PatternCache::new(
        store.clone() as Arc<dyn IPatternStore>,
        None,
        CacheConfig::default(),
    ));
    let learner = PatternLearner::new(store.clone(), cache, &config);
    Fixture { store, learner }
}

fn coffee_correction(predicted: Option<&str>) -> CorrectionEvent {
    let at = Utc.with_ymd_and_hms(2026, 3, 2, 8, 15, 0).unwrap();
    let expense = ExpenseSnapshot::new("STARBUCKS #1234 SEATTLE WA", "", 5.75, at);
    CorrectionEvent::new(expense, predicted.map(String::from), "cat-coffee")
}

#[test]
fn no_pattern_until_the_recurrence_threshold() {
    let f = fixture();

    for _ in 0..2 {
        let outcome = f.learner.apply_correction(&coffee_correction(None)).unwrap();
        assert!(!outcome.created);
        assert!(outcome.reinforced.is_none());
    }
    assert!(f.store.is_empty());

    let outcome = f.learner.apply_correction(&coffee_correction(None)).unwrap();
    assert!(outcome.created);

    let active = f.store.list_active(DEFAULT_SCOPE).unwrap();
    assert_eq!(active.len(), 1);
    let created = &active[0];
    assert_eq!(created.pattern_value, "starbucks");
    assert_eq!(created.category_id, "cat-coffee");
    assert_eq!(created.usage_count, 1);
    assert_eq!(created.success_count, 1);
    assert_eq!(created.metadata.typical_amount, Some(5.75));
}

#[test]
fn existing_pattern_is_reinforced_not_duplicated() {
    let f = fixture();

    for _ in 0..3 {
        f.learner.apply_correction(&coffee_correction(None)).unwrap();
    }
    let outcome = f.learner.apply_correction(&coffee_correction(None)).unwrap();
    assert!(!outcome.created);
    assert!(outcome.reinforced.is_some());

    let active = f.store.list_active(DEFAULT_SCOPE).unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].usage_count, 2);
    assert_eq!(active[0].success_count, 2);
}

#[test]
fn misprediction_penalizes_and_retires_chronic_offenders() {
    let f = fixture();

    let mut culprit = Pattern::new("cat-grocery", PatternType::Merchant, "starbucks");
    culprit.usage_count = 55;
    culprit.success_count = 10;
    let culprit = f.store.create(&culprit).unwrap();

    let outcome = f
        .learner
        .apply_correction(&coffee_correction(Some("cat-grocery")))
        .unwrap();

    assert_eq!(outcome.penalized, vec![culprit.id.clone()]);
    assert!(outcome.retired.contains(&culprit.id));

    let stored = f.store.get(&culprit.id).unwrap().unwrap();
    assert!(!stored.active);
    assert_eq!(stored.usage_count, 56);
    assert_eq!(stored.success_count, 10);
}

#[test]
fn near_duplicate_siblings_merge_without_losing_history() {
    let f = fixture();

    let mut strong = Pattern::new("cat-coffee", PatternType::Merchant, "starbucks");
    strong.usage_count = 10;
    strong.success_count = 8;
    let strong = f.store.create(&strong).unwrap();

    let mut weak = Pattern::new("cat-coffee", PatternType::Merchant, "starbuck");
    weak.usage_count = 10;
    weak.success_count = 2;
    let weak = f.store.create(&weak).unwrap();

    let outcome = f.learner.apply_correction(&coffee_correction(None)).unwrap();

    assert_eq!(outcome.merged_into, vec![strong.id.clone()]);
    assert_eq!(outcome.retired, vec![weak.id.clone()]);

    let keeper = f.store.get(&strong.id).unwrap().unwrap();
    // Reinforcement added one use, the merge pooled the sibling's history.
    assert_eq!(keeper.usage_count, 21);
    assert_eq!(keeper.success_count, 11);
    assert!(keeper.active);
    assert!(!f.store.get(&weak.id).unwrap().unwrap().active);
}

#[test]
fn decay_sweep_erodes_stale_patterns_once() {
    let f = fixture();

    let mut stale = Pattern::new("cat-coffee", PatternType::Merchant, "starbucks");
    stale.usage_count = 100;
    stale.success_count = 85;
    stale.created_at = Utc::now() - Duration::days(31);
    stale.updated_at = stale.created_at;
    let stale = f.store.create(&stale).unwrap();

    let mut fresh = Pattern::new("cat-grocery", PatternType::Merchant, "safeway");
    fresh.last_matched_at = Some(Utc::now());
    let fresh = f.store.create(&fresh).unwrap();

    let decayed = f.learner.decay_sweep(Utc::now()).unwrap();
    assert_eq!(decayed, 1);

    let eroded = f.store.get(&stale.id).unwrap().unwrap();
    assert!((eroded.confidence_weight.value() - 0.45).abs() < 1e-12);

    let untouched = f.store.get(&fresh.id).unwrap().unwrap();
    assert_eq!(untouched.confidence_weight.value(), 0.5);
}

#[test]
fn repeated_sweeps_compound_but_never_go_negative() {
    let f = fixture();

    let mut stale = Pattern::new("cat-coffee", PatternType::Merchant, "starbucks");
    stale.created_at = Utc::now() - Duration::days(365);
    stale.updated_at = stale.created_at;
    let stale = f.store.create(&stale).unwrap();

    let mut previous = 0.5;
    for _ in 0..20 {
        f.learner.decay_sweep(Utc::now()).unwrap();
        let current = f.store.get(&stale.id).unwrap().unwrap();
        let weight = current.confidence_weight.value();
        assert!(weight <= previous);
        assert!(weight >= 0.0);
        previous = weight;
    }
}

#[test]
fn batch_skips_malformed_items_and_applies_the_rest() {
    let f = fixture();

    let at = Utc.with_ymd_and_hms(2026, 3, 2, 8, 15, 0).unwrap();
    let blank = ExpenseSnapshot::new("", "", 5.75, at);
    let events = vec![
        coffee_correction(None),
        CorrectionEvent::new(blank, None, "cat-coffee"),
        coffee_correction(None),
        coffee_correction(None),
    ];

    let report = f.learner.apply_batch(&events).unwrap();
    assert_eq!(report.applied, 3);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].0, 1);
    // Three valid recurrences crossed the creation threshold.
    assert_eq!(report.created, 1);
    assert_eq!(f.store.list_active(DEFAULT_SCOPE).unwrap().len(), 1);
}

#[test]
fn low_information_merchants_never_become_patterns() {
    let f = fixture();

    let at = Utc.with_ymd_and_hms(2026, 3, 2, 8, 15, 0).unwrap();
    let expense = ExpenseSnapshot::new("THE", "", 5.75, at);
    for _ in 0..5 {
        let event = CorrectionEvent::new(expense.clone(), None, "cat-misc");
        let outcome = f.learner.apply_correction(&event).unwrap();
        assert!(!outcome.created);
    }
    assert!(f.store.is_empty());
}

#[test]
fn multi_word_patterns_are_reinforced_from_noisy_statements() {
    let f = fixture();

    let seeded = f
        .store
        .create(&Pattern::new("cat-donuts", PatternType::Merchant, "dunkin donuts"))
        .unwrap();

    let at = Utc.with_ymd_and_hms(2026, 3, 2, 8, 15, 0).unwrap();
    let expense = ExpenseSnapshot::new("DUNKIN DONUTS #55 BOSTON MA", "", 3.25, at);
    let event = CorrectionEvent::new(expense, None, "cat-donuts");
    let outcome = f.learner.apply_correction(&event).unwrap();

    assert_eq!(outcome.reinforced, Some(seeded.id.clone()));
    assert!(!outcome.created);
    assert_eq!(f.store.list_active(DEFAULT_SCOPE).unwrap().len(), 1);
    assert_eq!(f.store.get(&seeded.id).unwrap().unwrap().usage_count, 1);
}

/// Delegates to the in-memory store but fails the first N updates with a
/// version conflict, as a competing writer would.
struct ContendedStore {
    inner: MemoryPatternStore,
    forced_conflicts: AtomicUsize,
}

impl ContendedStore {
    fn new(forced_conflicts: usize) -> Self {
        Self {
            inner: MemoryPatternStore::new(),
            forced_conflicts: AtomicUsize::new(forced_conflicts),
        }
    }
}

impl IPatternStore for ContendedStore {
    fn list_active(&self, scope: &str) -> TallyResult<Vec<Pattern>> {
        self.inner.list_active(scope)
    }

    fn get(&self, id: &str) -> TallyResult<Option<Pattern>> {
        self.inner.get(id)
    }

    fn find_similar(
        &self,
        pattern_type: PatternType,
        value: &str,
        category_id: &str,
        threshold: f64,
    ) -> TallyResult<Vec<Pattern>> {
        self.inner.find_similar(pattern_type, value, category_id, threshold)
    }

    fn list_stale(&self, before: DateTime<Utc>) -> TallyResult<Vec<Pattern>> {
        self.inner.list_stale(before)
    }

    fn create(&self, pattern: &Pattern) -> TallyResult<Pattern> {
        self.inner.create(pattern)
    }

    fn update(&self, pattern: &Pattern) -> TallyResult<Pattern> {
        let remaining = self.forced_conflicts.load(Ordering::SeqCst);
        if remaining > 0 {
            self.forced_conflicts.store(remaining - 1, Ordering::SeqCst);
            return Err(TallyError::Store(StoreError::Conflict {
                pattern_id: pattern.id.clone(),
                expected_version: pattern.version,
            }));
        }
        self.inner.update(pattern)
    }

    fn retire(&self, id: &str) -> TallyResult<()> {
        self.inner.retire(id)
    }

    fn begin_batch(&self) -> TallyResult<()> {
        self.inner.begin_batch()
    }

    fn commit_batch(&self) -> TallyResult<()> {
        self.inner.commit_batch()
    }

    fn rollback_batch(&self) -> TallyResult<()> {
        self.inner.rollback_batch()
    }
}

fn contended_fixture(forced_conflicts: usize) -> (Arc<ContendedStore>, PatternLearner) {
    let store = Arc::new(ContendedStore::new(forced_conflicts));
    let cache = Arc::new(PatternCache::new(
        store.clone() as Arc<dyn IPatternStore>,
        None,
        CacheConfig::default(),
    ));
    let learner = PatternLearner::new(store.clone(), cache, &TallyConfig::default());
    (store, learner)
}

#[test]
fn one_conflict_is_retried_and_absorbed() {
    let (store, learner) = contended_fixture(1);
    let seeded = store
        .create(&Pattern::new("cat-coffee", PatternType::Merchant, "starbucks"))
        .unwrap();

    let outcome = learner.apply_correction(&coffee_correction(None)).unwrap();

    assert_eq!(outcome.reinforced, Some(seeded.id.clone()));
    assert_eq!(store.get(&seeded.id).unwrap().unwrap().usage_count, 1);
}

#[test]
fn a_second_conflict_surfaces_to_the_caller() {
    let (store, learner) = contended_fixture(2);
    store
        .create(&Pattern::new("cat-coffee", PatternType::Merchant, "starbucks"))
        .unwrap();

    let err = learner
        .apply_correction(&coffee_correction(None))
        .unwrap_err();
    assert!(matches!(
        err,
        TallyError::Store(StoreError::Conflict { .. })
    ));
}

#[test]
fn oversized_batches_are_rejected_outright() {
    let mut config = TallyConfig::default();
    config.learning.max_batch_size = 2;
    let f = fixture_with(config);

    let events = vec![
        coffee_correction(None),
        coffee_correction(None),
        coffee_correction(None),
    ];
    let err = f.learner.apply_batch(&events).unwrap_err();
    assert!(matches!(
        err,
        TallyError::Learning(LearningError::BatchTooLarge { size: 3, max: 2 })
    ));
    assert!(f.store.is_empty());
}
