//! v001: the patterns table.
//!
//! The partial unique index enforces one ACTIVE pattern per
//! (type, value, category); retired rows keep their history without
//! blocking a successor.

use rusqlite::Connection;

pub fn up(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS patterns (
            id                TEXT PRIMARY KEY,
            category_id       TEXT NOT NULL,
            pattern_type      TEXT NOT NULL,
            pattern_value     TEXT NOT NULL,
            confidence_weight REAL NOT NULL DEFAULT 0.5,
            usage_count       INTEGER NOT NULL DEFAULT 0,
            success_count     INTEGER NOT NULL DEFAULT 0,
            active            INTEGER NOT NULL DEFAULT 1,
            metadata          TEXT NOT NULL DEFAULT '{}',
            last_matched_at   TEXT,
            created_at        TEXT NOT NULL,
            updated_at        TEXT NOT NULL,
            version           INTEGER NOT NULL DEFAULT 0
        );

        CREATE UNIQUE INDEX IF NOT EXISTS ux_patterns_identity
            ON patterns (pattern_type, pattern_value, category_id)
            WHERE active = 1;

        CREATE INDEX IF NOT EXISTS ix_patterns_active_category
            ON patterns (active, category_id);

        CREATE INDEX IF NOT EXISTS ix_patterns_last_matched
            ON patterns (last_matched_at)
            WHERE active = 1;
        ",
    )
}
