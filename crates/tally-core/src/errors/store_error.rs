/// Store-layer errors for pattern persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("pattern not found: {id}")]
    NotFound { id: String },

    #[error("concurrent update of pattern {pattern_id}: expected version {expected_version}")]
    Conflict {
        pattern_id: String,
        expected_version: u64,
    },

    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("duplicate active pattern: {pattern_type}/{pattern_value} for category {category_id}")]
    DuplicatePattern {
        pattern_type: String,
        pattern_value: String,
        category_id: String,
    },
}
