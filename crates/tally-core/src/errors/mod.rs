//! Error taxonomy: per-subsystem enums unified under [`TallyError`].

mod cache_error;
mod learning_error;
mod match_error;
mod store_error;
mod validation_error;

pub use cache_error::CacheError;
pub use learning_error::LearningError;
pub use match_error::MatchError;
pub use store_error::StoreError;
pub use validation_error::ValidationError;

/// Unified error type for the whole workspace.
#[derive(Debug, thiserror::Error)]
pub enum TallyError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Learning(#[from] LearningError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias used across the workspace.
pub type TallyResult<T> = Result<T, TallyError>;

impl TallyError {
    /// Whether this error represents a transient dependency problem that a
    /// caller may retry (shared tier down, store busy, row conflict).
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            TallyError::Cache(CacheError::SharedTierUnavailable { .. })
                | TallyError::Store(StoreError::Unavailable { .. })
                | TallyError::Store(StoreError::Conflict { .. })
        )
    }
}
