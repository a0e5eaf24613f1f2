//! Read-side queries: active sets, similarity candidates, stale rows.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use tally_core::constants::DEFAULT_SCOPE;
use tally_core::pattern::{Pattern, PatternType};
use tally_core::TallyResult;

use super::pattern_crud::{row_to_pattern, PATTERN_COLUMNS};
use crate::to_store_err;

/// Active patterns for a scope. The default scope returns everything;
/// any other scope narrows to that category.
pub fn list_active(conn: &Connection, scope: &str) -> TallyResult<Vec<Pattern>> {
    let sql = format!(
        "SELECT {PATTERN_COLUMNS} FROM patterns
         WHERE active = 1 AND (?1 = ?2 OR category_id = ?1)
         ORDER BY created_at, id"
    );
    let mut stmt = conn
        .prepare_cached(&sql)
        .map_err(|e| to_store_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![scope, DEFAULT_SCOPE], row_to_pattern)
        .map_err(|e| to_store_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_store_err(e.to_string()))
}

/// Active same-type, same-category rows: the candidate set the engine
/// filters by textual similarity in Rust.
pub fn similarity_candidates(
    conn: &Connection,
    pattern_type: PatternType,
    category_id: &str,
) -> TallyResult<Vec<Pattern>> {
    let sql = format!(
        "SELECT {PATTERN_COLUMNS} FROM patterns
         WHERE active = 1 AND pattern_type = ?1 AND category_id = ?2
         ORDER BY created_at, id"
    );
    let mut stmt = conn
        .prepare_cached(&sql)
        .map_err(|e| to_store_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![pattern_type.as_str(), category_id], row_to_pattern)
        .map_err(|e| to_store_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_store_err(e.to_string()))
}

/// Active patterns that have not matched since `before`. Rows that never
/// matched at all age from their creation time.
pub fn list_stale(conn: &Connection, before: DateTime<Utc>) -> TallyResult<Vec<Pattern>> {
    let sql = format!(
        "SELECT {PATTERN_COLUMNS} FROM patterns
         WHERE active = 1 AND COALESCE(last_matched_at, created_at) < ?1
         ORDER BY created_at, id"
    );
    let mut stmt = conn
        .prepare_cached(&sql)
        .map_err(|e| to_store_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![before.to_rfc3339()], row_to_pattern)
        .map_err(|e| to_store_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_store_err(e.to_string()))
}
