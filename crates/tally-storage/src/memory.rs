//! In-process pattern store for tests. Honors the same DuplicatePattern,
//! Conflict and NotFound contracts as the SQLite engine; batch support is
//! a whole-map snapshot restored on rollback.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use tally_core::constants::DEFAULT_SCOPE;
use tally_core::errors::StoreError;
use tally_core::pattern::{Pattern, PatternType};
use tally_core::traits::IPatternStore;
use tally_core::{TallyError, TallyResult};

use tally_match::algorithms::levenshtein_ratio;
use tally_match::normalize::normalize;

#[derive(Default)]
pub struct MemoryPatternStore {
    patterns: DashMap<String, Pattern>,
    snapshot: Mutex<Option<Vec<Pattern>>>,
}

impl MemoryPatternStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn has_active_duplicate(&self, candidate: &Pattern) -> bool {
        self.patterns.iter().any(|entry| {
            let p = entry.value();
            p.id != candidate.id
                && p.active
                && p.pattern_type == candidate.pattern_type
                && p.pattern_value == candidate.pattern_value
                && p.category_id == candidate.category_id
        })
    }
}

impl IPatternStore for MemoryPatternStore {
    fn list_active(&self, scope: &str) -> TallyResult<Vec<Pattern>> {
        let mut out: Vec<Pattern> = self
            .patterns
            .iter()
            .filter(|entry| {
                let p = entry.value();
                p.active && (scope == DEFAULT_SCOPE || p.category_id == scope)
            })
            .map(|entry| entry.value().clone())
            .collect();
        out.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(out)
    }

    fn get(&self, id: &str) -> TallyResult<Option<Pattern>> {
        Ok(self.patterns.get(id).map(|entry| entry.value().clone()))
    }

    fn find_similar(
        &self,
        pattern_type: PatternType,
        value: &str,
        category_id: &str,
        threshold: f64,
    ) -> TallyResult<Vec<Pattern>> {
        let needle = normalize(value);
        let mut out: Vec<Pattern> = self
            .patterns
            .iter()
            .filter(|entry| {
                let p = entry.value();
                p.active
                    && p.pattern_type == pattern_type
                    && p.category_id == category_id
                    && levenshtein_ratio(&needle, &normalize(&p.pattern_value)) >= threshold
            })
            .map(|entry| entry.value().clone())
            .collect();
        out.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(out)
    }

    fn list_stale(&self, before: DateTime<Utc>) -> TallyResult<Vec<Pattern>> {
        let mut out: Vec<Pattern> = self
            .patterns
            .iter()
            .filter(|entry| {
                let p = entry.value();
                p.active && p.last_matched_at.unwrap_or(p.created_at) < before
            })
            .map(|entry| entry.value().clone())
            .collect();
        out.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(out)
    }

    fn create(&self, pattern: &Pattern) -> TallyResult<Pattern> {
        if pattern.active && self.has_active_duplicate(pattern) {
            return Err(TallyError::Store(StoreError::DuplicatePattern {
                pattern_type: pattern.pattern_type.to_string(),
                pattern_value: pattern.pattern_value.clone(),
                category_id: pattern.category_id.clone(),
            }));
        }
        self.patterns.insert(pattern.id.clone(), pattern.clone());
        Ok(pattern.clone())
    }

    fn update(&self, pattern: &Pattern) -> TallyResult<Pattern> {
        let mut entry = self.patterns.get_mut(&pattern.id).ok_or_else(|| {
            TallyError::Store(StoreError::NotFound {
                id: pattern.id.clone(),
            })
        })?;
        if entry.version != pattern.version {
            return Err(TallyError::Store(StoreError::Conflict {
                pattern_id: pattern.id.clone(),
                expected_version: pattern.version,
            }));
        }
        let mut updated = pattern.clone();
        updated.version += 1;
        *entry = updated.clone();
        Ok(updated)
    }

    fn retire(&self, id: &str) -> TallyResult<()> {
        let mut entry = self.patterns.get_mut(id).ok_or_else(|| {
            TallyError::Store(StoreError::NotFound { id: id.to_string() })
        })?;
        if entry.active {
            entry.active = false;
            entry.updated_at = Utc::now();
            entry.version += 1;
        }
        Ok(())
    }

    fn begin_batch(&self) -> TallyResult<()> {
        let mut snapshot = self
            .snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *snapshot = Some(
            self.patterns
                .iter()
                .map(|entry| entry.value().clone())
                .collect(),
        );
        Ok(())
    }

    fn commit_batch(&self) -> TallyResult<()> {
        let mut snapshot = self
            .snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *snapshot = None;
        Ok(())
    }

    fn rollback_batch(&self) -> TallyResult<()> {
        let mut snapshot = self
            .snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(saved) = snapshot.take() {
            self.patterns.clear();
            for pattern in saved {
                self.patterns.insert(pattern.id.clone(), pattern);
            }
        }
        Ok(())
    }
}
