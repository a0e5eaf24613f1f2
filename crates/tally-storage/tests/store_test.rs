//! File-backed StoreEngine integration tests.

use chrono::{Duration, Utc};
use tempfile::TempDir;

use tally_core::constants::DEFAULT_SCOPE;
use tally_core::errors::StoreError;
use tally_core::pattern::{Pattern, PatternType};
use tally_core::traits::IPatternStore;
use tally_core::TallyError;
use tally_storage::StoreEngine;

fn open_engine(dir: &TempDir) -> StoreEngine {
    StoreEngine::open(&dir.path().join("tally.db")).unwrap()
}

fn merchant(category: &str, value: &str) -> Pattern {
    Pattern::new(category, PatternType::Merchant, value)
}

#[test]
fn created_patterns_round_trip_with_metadata() {
    let dir = TempDir::new().unwrap();
    let engine = open_engine(&dir);

    let mut pattern = merchant("cat-coffee", "starbucks");
    pattern.metadata.observe_amount(5.75);
    pattern.metadata.observe_time(Utc::now());
    engine.create(&pattern).unwrap();

    let loaded = engine.get(&pattern.id).unwrap().unwrap();
    assert_eq!(loaded.pattern_value, "starbucks");
    assert_eq!(loaded.metadata.typical_amount, Some(5.75));
    assert!(loaded.metadata.temporal.is_some());
}

#[test]
fn rows_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let pattern = merchant("cat-coffee", "starbucks");
    {
        let engine = open_engine(&dir);
        engine.create(&pattern).unwrap();
    }
    let engine = open_engine(&dir);
    assert!(engine.get(&pattern.id).unwrap().is_some());
}

#[test]
fn duplicate_active_identity_is_rejected() {
    let dir = TempDir::new().unwrap();
    let engine = open_engine(&dir);

    engine.create(&merchant("cat-coffee", "starbucks")).unwrap();
    let err = engine
        .create(&merchant("cat-coffee", "starbucks"))
        .unwrap_err();
    assert!(matches!(
        err,
        TallyError::Store(StoreError::DuplicatePattern { .. })
    ));
}

#[test]
fn retiring_frees_the_identity_slot() {
    let dir = TempDir::new().unwrap();
    let engine = open_engine(&dir);

    let first = engine.create(&merchant("cat-coffee", "starbucks")).unwrap();
    engine.retire(&first.id).unwrap();
    engine.create(&merchant("cat-coffee", "starbucks")).unwrap();

    let active = engine.list_active(DEFAULT_SCOPE).unwrap();
    assert_eq!(active.len(), 1);
}

#[test]
fn stale_version_update_is_a_conflict() {
    let dir = TempDir::new().unwrap();
    let engine = open_engine(&dir);

    let created = engine.create(&merchant("cat-coffee", "starbucks")).unwrap();

    let mut first_writer = created.clone();
    first_writer.usage_count = 1;
    let updated = engine.update(&first_writer).unwrap();
    assert_eq!(updated.version, created.version + 1);

    let mut second_writer = created;
    second_writer.usage_count = 2;
    let err = engine.update(&second_writer).unwrap_err();
    assert!(matches!(
        err,
        TallyError::Store(StoreError::Conflict { .. })
    ));
}

#[test]
fn scope_narrows_to_one_category() {
    let dir = TempDir::new().unwrap();
    let engine = open_engine(&dir);

    engine.create(&merchant("cat-coffee", "starbucks")).unwrap();
    engine.create(&merchant("cat-grocery", "safeway")).unwrap();

    assert_eq!(engine.list_active(DEFAULT_SCOPE).unwrap().len(), 2);
    let coffee = engine.list_active("cat-coffee").unwrap();
    assert_eq!(coffee.len(), 1);
    assert_eq!(coffee[0].pattern_value, "starbucks");
}

#[test]
fn list_stale_ages_unmatched_rows_from_creation() {
    let dir = TempDir::new().unwrap();
    let engine = open_engine(&dir);

    let mut old = merchant("cat-coffee", "starbucks");
    old.created_at = Utc::now() - Duration::days(45);
    old.updated_at = old.created_at;
    engine.create(&old).unwrap();

    let mut fresh = merchant("cat-grocery", "safeway");
    fresh.last_matched_at = Some(Utc::now());
    engine.create(&fresh).unwrap();

    let stale = engine.list_stale(Utc::now() - Duration::days(30)).unwrap();
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].pattern_value, "starbucks");
}

#[test]
fn find_similar_applies_the_ratio_threshold() {
    let dir = TempDir::new().unwrap();
    let engine = open_engine(&dir);

    engine.create(&merchant("cat-coffee", "starbucks")).unwrap();
    engine.create(&merchant("cat-coffee", "peets")).unwrap();

    let similar = engine
        .find_similar(PatternType::Merchant, "starbuck", "cat-coffee", 0.85)
        .unwrap();
    assert_eq!(similar.len(), 1);
    assert_eq!(similar[0].pattern_value, "starbucks");
}

#[test]
fn batch_rollback_discards_writes() {
    let dir = TempDir::new().unwrap();
    let engine = open_engine(&dir);

    engine.create(&merchant("cat-coffee", "starbucks")).unwrap();

    engine.begin_batch().unwrap();
    engine.create(&merchant("cat-grocery", "safeway")).unwrap();
    engine.rollback_batch().unwrap();

    assert_eq!(engine.list_active(DEFAULT_SCOPE).unwrap().len(), 1);
}

#[test]
fn reads_inside_a_batch_observe_uncommitted_writes() {
    let dir = TempDir::new().unwrap();
    let engine = open_engine(&dir);

    let created = engine.create(&merchant("cat-coffee", "starbucks")).unwrap();

    engine.begin_batch().unwrap();
    let mut first = engine.get(&created.id).unwrap().unwrap();
    first.record_success(Utc::now());
    let updated = engine.update(&first).unwrap();

    // A read between the batch's writes must see the bumped version, or
    // the next version-checked update inside the batch would conflict.
    let mut second = engine.get(&created.id).unwrap().unwrap();
    assert_eq!(second.version, updated.version);
    second.record_success(Utc::now());
    engine.update(&second).unwrap();
    engine.commit_batch().unwrap();

    let after = engine.get(&created.id).unwrap().unwrap();
    assert_eq!(after.usage_count, 2);
}

#[test]
fn batch_commit_keeps_writes() {
    let dir = TempDir::new().unwrap();
    let engine = open_engine(&dir);

    engine.begin_batch().unwrap();
    engine.create(&merchant("cat-coffee", "starbucks")).unwrap();
    engine.create(&merchant("cat-grocery", "safeway")).unwrap();
    engine.commit_batch().unwrap();

    assert_eq!(engine.list_active(DEFAULT_SCOPE).unwrap().len(), 2);
}
