//! Insert, get, version-checked update, retire.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use tally_core::errors::StoreError;
use tally_core::pattern::{Pattern, PatternType, Weight};
use tally_core::{TallyError, TallyResult};

use crate::to_store_err;

pub(crate) const PATTERN_COLUMNS: &str = "id, category_id, pattern_type, pattern_value, \
     confidence_weight, usage_count, success_count, active, metadata, \
     last_matched_at, created_at, updated_at, version";

/// Map one row (selected with `PATTERN_COLUMNS`) back into a Pattern.
pub(crate) fn row_to_pattern(row: &Row<'_>) -> rusqlite::Result<Pattern> {
    let type_str: String = row.get(2)?;
    let pattern_type = PatternType::from_str(&type_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, e.into())
    })?;
    let metadata_json: String = row.get(8)?;
    let metadata = serde_json::from_str(&metadata_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(8, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Pattern {
        id: row.get(0)?,
        category_id: row.get(1)?,
        pattern_type,
        pattern_value: row.get(3)?,
        confidence_weight: Weight::new(row.get(4)?),
        usage_count: row.get::<_, i64>(5)? as u64,
        success_count: row.get::<_, i64>(6)? as u64,
        active: row.get(7)?,
        metadata,
        last_matched_at: parse_time_opt(row, 9)?,
        created_at: parse_time(row, 10)?,
        updated_at: parse_time(row, 11)?,
        version: row.get::<_, i64>(12)? as u64,
    })
}

fn parse_time(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn parse_time_opt(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(idx)?;
    match raw {
        None => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .map(|t| Some(t.with_timezone(&Utc)))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    idx,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            }),
    }
}

pub fn insert_pattern(conn: &Connection, pattern: &Pattern) -> TallyResult<()> {
    let metadata_json =
        serde_json::to_string(&pattern.metadata).map_err(|e| to_store_err(e.to_string()))?;
    let outcome = conn.execute(
        "INSERT INTO patterns (
            id, category_id, pattern_type, pattern_value, confidence_weight,
            usage_count, success_count, active, metadata, last_matched_at,
            created_at, updated_at, version
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            pattern.id,
            pattern.category_id,
            pattern.pattern_type.as_str(),
            pattern.pattern_value,
            pattern.confidence_weight.value(),
            pattern.usage_count as i64,
            pattern.success_count as i64,
            pattern.active,
            metadata_json,
            pattern.last_matched_at.map(|t| t.to_rfc3339()),
            pattern.created_at.to_rfc3339(),
            pattern.updated_at.to_rfc3339(),
            pattern.version as i64,
        ],
    );
    match outcome {
        Ok(_) => Ok(()),
        Err(e) if e.sqlite_error_code() == Some(rusqlite::ErrorCode::ConstraintViolation) => {
            Err(TallyError::Store(StoreError::DuplicatePattern {
                pattern_type: pattern.pattern_type.to_string(),
                pattern_value: pattern.pattern_value.clone(),
                category_id: pattern.category_id.clone(),
            }))
        }
        Err(e) => Err(to_store_err(e.to_string())),
    }
}

pub fn get_pattern(conn: &Connection, id: &str) -> TallyResult<Option<Pattern>> {
    let sql = format!("SELECT {PATTERN_COLUMNS} FROM patterns WHERE id = ?1");
    let mut stmt = conn
        .prepare_cached(&sql)
        .map_err(|e| to_store_err(e.to_string()))?;
    stmt.query_row(params![id], row_to_pattern)
        .map(Some)
        .or_else(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Ok(None),
            other => Err(to_store_err(other.to_string())),
        })
}

/// Version-checked update. The WHERE clause only hits when the caller saw
/// the current row; zero rows affected means either a stale read (Conflict)
/// or a row that never existed (NotFound).
pub fn update_pattern(conn: &Connection, pattern: &Pattern) -> TallyResult<Pattern> {
    let metadata_json =
        serde_json::to_string(&pattern.metadata).map_err(|e| to_store_err(e.to_string()))?;
    let affected = conn
        .execute(
            "UPDATE patterns SET
                category_id = ?1, pattern_type = ?2, pattern_value = ?3,
                confidence_weight = ?4, usage_count = ?5, success_count = ?6,
                active = ?7, metadata = ?8, last_matched_at = ?9,
                updated_at = ?10, version = version + 1
             WHERE id = ?11 AND version = ?12",
            params![
                pattern.category_id,
                pattern.pattern_type.as_str(),
                pattern.pattern_value,
                pattern.confidence_weight.value(),
                pattern.usage_count as i64,
                pattern.success_count as i64,
                pattern.active,
                metadata_json,
                pattern.last_matched_at.map(|t| t.to_rfc3339()),
                pattern.updated_at.to_rfc3339(),
                pattern.id,
                pattern.version as i64,
            ],
        )
        .map_err(|e| to_store_err(e.to_string()))?;

    if affected == 0 {
        return match get_pattern(conn, &pattern.id)? {
            Some(_) => Err(TallyError::Store(StoreError::Conflict {
                pattern_id: pattern.id.clone(),
                expected_version: pattern.version,
            })),
            None => Err(TallyError::Store(StoreError::NotFound {
                id: pattern.id.clone(),
            })),
        };
    }

    let mut updated = pattern.clone();
    updated.version += 1;
    Ok(updated)
}

pub fn retire_pattern(conn: &Connection, id: &str, at: DateTime<Utc>) -> TallyResult<()> {
    let affected = conn
        .execute(
            "UPDATE patterns SET active = 0, updated_at = ?1, version = version + 1
             WHERE id = ?2 AND active = 1",
            params![at.to_rfc3339(), id],
        )
        .map_err(|e| to_store_err(e.to_string()))?;
    if affected == 0 && get_pattern(conn, id)?.is_none() {
        return Err(TallyError::Store(StoreError::NotFound { id: id.to_string() }));
    }
    Ok(())
}
