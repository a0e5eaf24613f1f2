//! Pattern persistence.
//!
//! `StoreEngine` is the production `IPatternStore`: a single SQLite write
//! connection plus a round-robin read pool, WAL throughout, numbered
//! migrations, and a `version` column giving optimistic concurrency on
//! every row. `MemoryPatternStore` is the in-process stand-in the cache,
//! learner and engine tests run against.

pub mod engine;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StoreEngine;
pub use memory::MemoryPatternStore;

use tally_core::errors::StoreError;
use tally_core::TallyError;

/// Wrap a low-level SQLite failure into the store error taxonomy.
pub(crate) fn to_store_err(message: impl Into<String>) -> TallyError {
    TallyError::Store(StoreError::Sqlite {
        message: message.into(),
    })
}
