use chrono::{DateTime, Utc};

use crate::errors::TallyResult;
use crate::pattern::{Pattern, PatternType};

/// Source of truth for patterns. All learner mutation goes through this
/// interface, never directly against a cache.
///
/// `update` is version-checked: implementations must compare the caller's
/// `pattern.version` against the stored row and return
/// `StoreError::Conflict` on mismatch, bumping the version on success.
pub trait IPatternStore: Send + Sync {
    // --- Reads ---
    /// All active patterns for a scope. "all" returns every active pattern.
    fn list_active(&self, scope: &str) -> TallyResult<Vec<Pattern>>;
    fn get(&self, id: &str) -> TallyResult<Option<Pattern>>;
    /// Active same-type, same-category patterns whose value is textually
    /// similar to `value` at or above `threshold`.
    fn find_similar(
        &self,
        pattern_type: PatternType,
        value: &str,
        category_id: &str,
        threshold: f64,
    ) -> TallyResult<Vec<Pattern>>;
    /// Active patterns untouched since `before` (for the decay sweep).
    fn list_stale(&self, before: DateTime<Utc>) -> TallyResult<Vec<Pattern>>;

    // --- Writes ---
    fn create(&self, pattern: &Pattern) -> TallyResult<Pattern>;
    fn update(&self, pattern: &Pattern) -> TallyResult<Pattern>;
    fn retire(&self, id: &str) -> TallyResult<()>;

    // --- Transactions ---
    /// Begin a logical transaction covering subsequent writes; paired with
    /// `commit_batch`/`rollback_batch`. Implementations without real
    /// transactions may make these no-ops.
    fn begin_batch(&self) -> TallyResult<()>;
    fn commit_batch(&self) -> TallyResult<()>;
    fn rollback_batch(&self) -> TallyResult<()>;
}
