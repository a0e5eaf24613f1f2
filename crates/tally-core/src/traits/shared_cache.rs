use std::time::Duration;

use crate::errors::TallyResult;

/// The shared (cross-process) cache tier. Best-effort by contract: absence
/// degrades performance, never correctness. Implementations must be safe
/// for concurrent readers and writers.
pub trait ISharedCache: Send + Sync {
    /// Fetch a raw entry. Ok(None) is a miss.
    fn get(&self, key: &str) -> TallyResult<Option<Vec<u8>>>;
    /// Store a raw entry with a TTL.
    fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> TallyResult<()>;
    /// Remove all entries whose key starts with `prefix`.
    fn delete_matching(&self, prefix: &str) -> TallyResult<()>;
}
