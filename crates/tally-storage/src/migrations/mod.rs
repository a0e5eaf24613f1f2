//! Numbered, idempotent schema migrations. `schema_migrations` records what
//! has been applied; each migration runs inside its own transaction.

pub mod v001_patterns;

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::info;

use tally_core::errors::StoreError;
use tally_core::TallyResult;

use crate::to_store_err;

pub fn run_migrations(conn: &Connection) -> TallyResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        )",
    )
    .map_err(|e| to_store_err(e.to_string()))?;

    apply(conn, 1, v001_patterns::up)?;
    Ok(())
}

fn apply(
    conn: &Connection,
    version: u32,
    up: fn(&Connection) -> rusqlite::Result<()>,
) -> TallyResult<()> {
    let already: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM schema_migrations WHERE version = ?1)",
            params![version],
            |row| row.get(0),
        )
        .map_err(|e| to_store_err(e.to_string()))?;
    if already {
        return Ok(());
    }

    let failed = |reason: String| {
        tally_core::TallyError::Store(StoreError::MigrationFailed { version, reason })
    };

    let tx = conn
        .unchecked_transaction()
        .map_err(|e| failed(e.to_string()))?;
    up(&tx).map_err(|e| failed(e.to_string()))?;
    tx.execute(
        "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
        params![version, Utc::now().to_rfc3339()],
    )
    .map_err(|e| failed(e.to_string()))?;
    tx.commit().map_err(|e| failed(e.to_string()))?;

    info!(version, "schema migration applied");
    Ok(())
}
