//! In-process implementation of the shared tier contract.
//!
//! The real shared tier is an external dependency (a networked cache).
//! This DashMap-backed implementation honors the same TTL semantics and
//! serves single-node deployments and tests.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use tally_core::errors::TallyResult;
use tally_core::traits::ISharedCache;

struct Entry {
    value: Vec<u8>,
    stored_at: Instant,
    ttl: Duration,
}

impl Entry {
    fn expired(&self) -> bool {
        self.stored_at.elapsed() >= self.ttl
    }
}

/// DashMap-backed shared cache, safe for concurrent readers and writers.
#[derive(Default)]
pub struct MemorySharedCache {
    entries: DashMap<String, Entry>,
}

impl MemorySharedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| !e.expired()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ISharedCache for MemorySharedCache {
    fn get(&self, key: &str) -> TallyResult<Option<Vec<u8>>> {
        if let Some(entry) = self.entries.get(key) {
            if !entry.expired() {
                return Ok(Some(entry.value.clone()));
            }
        }
        // Expired entries are dropped lazily on read.
        self.entries.remove_if(key, |_, e| e.expired());
        Ok(None)
    }

    fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> TallyResult<()> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value,
                stored_at: Instant::now(),
                ttl,
            },
        );
        Ok(())
    }

    fn delete_matching(&self, prefix: &str) -> TallyResult<()> {
        self.entries.retain(|key, _| !key.starts_with(prefix));
        Ok(())
    }
}
