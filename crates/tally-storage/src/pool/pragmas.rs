//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, 64MB cache, 5s busy_timeout, foreign_keys ON.

use rusqlite::Connection;

use tally_core::TallyResult;

use crate::to_store_err;

/// Apply performance and safety pragmas to a write connection.
pub fn apply_pragmas(conn: &Connection) -> TallyResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -64000;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}

/// Pragmas for read connections. Journal mode is a database property set by
/// the writer; read-only connections may not change it, so only per-connection
/// tuning is applied here.
pub fn apply_read_pragmas(conn: &Connection) -> TallyResult<()> {
    conn.execute_batch(
        "
        PRAGMA cache_size = -64000;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> TallyResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_store_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
