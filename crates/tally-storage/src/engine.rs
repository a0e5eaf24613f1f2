//! StoreEngine: owns the connection pool and implements IPatternStore.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::debug;

use tally_core::pattern::{Pattern, PatternType};
use tally_core::traits::IPatternStore;
use tally_core::TallyResult;

use tally_match::algorithms::levenshtein_ratio;
use tally_match::normalize::normalize;

use crate::migrations;
use crate::pool::{ConnectionPool, DEFAULT_READERS};
use crate::queries::{pattern_crud, pattern_query};

pub struct StoreEngine {
    pool: ConnectionPool,
}

impl StoreEngine {
    /// Open a store backed by a file on disk, running any pending
    /// migrations.
    pub fn open(path: &Path) -> TallyResult<Self> {
        let pool = ConnectionPool::open(path, DEFAULT_READERS)?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> TallyResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> TallyResult<()> {
        self.pool.write(|conn| migrations::run_migrations(conn))
    }
}

impl IPatternStore for StoreEngine {
    fn list_active(&self, scope: &str) -> TallyResult<Vec<Pattern>> {
        self.pool.read(|conn| pattern_query::list_active(conn, scope))
    }

    fn get(&self, id: &str) -> TallyResult<Option<Pattern>> {
        self.pool.read(|conn| pattern_crud::get_pattern(conn, id))
    }

    fn find_similar(
        &self,
        pattern_type: PatternType,
        value: &str,
        category_id: &str,
        threshold: f64,
    ) -> TallyResult<Vec<Pattern>> {
        let candidates = self.pool.read(|conn| {
            pattern_query::similarity_candidates(conn, pattern_type, category_id)
        })?;
        let needle = normalize(value);
        let similar: Vec<Pattern> = candidates
            .into_iter()
            .filter(|p| levenshtein_ratio(&needle, &normalize(&p.pattern_value)) >= threshold)
            .collect();
        debug!(
            %pattern_type,
            category_id,
            count = similar.len(),
            "similarity candidates filtered"
        );
        Ok(similar)
    }

    fn list_stale(&self, before: DateTime<Utc>) -> TallyResult<Vec<Pattern>> {
        self.pool.read(|conn| pattern_query::list_stale(conn, before))
    }

    fn create(&self, pattern: &Pattern) -> TallyResult<Pattern> {
        self.pool.write(|conn| {
            pattern_crud::insert_pattern(conn, pattern)?;
            Ok(pattern.clone())
        })
    }

    fn update(&self, pattern: &Pattern) -> TallyResult<Pattern> {
        self.pool
            .write(|conn| pattern_crud::update_pattern(conn, pattern))
    }

    fn retire(&self, id: &str) -> TallyResult<()> {
        self.pool
            .write(|conn| pattern_crud::retire_pattern(conn, id, Utc::now()))
    }

    fn begin_batch(&self) -> TallyResult<()> {
        self.pool.begin_batch()
    }

    fn commit_batch(&self) -> TallyResult<()> {
        self.pool.commit_batch()
    }

    fn rollback_batch(&self) -> TallyResult<()> {
        self.pool.rollback_batch()
    }
}
