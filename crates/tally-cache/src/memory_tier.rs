//! In-process tier using moka.
//!
//! TinyLFU admission, per-cache TTL. Keys are scope + day-bucket strings;
//! values are immutable snapshots of the active pattern set.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use tally_core::pattern::Pattern;

/// The in-process pattern tier.
pub struct MemoryTier {
    cache: Cache<String, Arc<Vec<Pattern>>>,
}

impl MemoryTier {
    /// Create a tier holding up to `max_entries` scopes with the given TTL.
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    /// Get a snapshot by cache key.
    pub fn get(&self, key: &str) -> Option<Arc<Vec<Pattern>>> {
        self.cache.get(key)
    }

    /// Insert a snapshot.
    pub fn insert(&self, key: String, patterns: Arc<Vec<Pattern>>) {
        self.cache.insert(key, patterns);
    }

    /// Drop one key.
    pub fn invalidate(&self, key: &str) {
        self.cache.invalidate(key);
    }

    /// Drop everything.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::pattern::PatternType;

    #[test]
    fn insert_and_get() {
        let tier = MemoryTier::new(16, Duration::from_secs(60));
        let snapshot = Arc::new(vec![Pattern::new("c", PatternType::Merchant, "starbucks")]);
        tier.insert("k".to_string(), snapshot.clone());
        assert_eq!(tier.get("k").unwrap().len(), 1);
    }

    #[test]
    fn miss_returns_none() {
        let tier = MemoryTier::new(16, Duration::from_secs(60));
        assert!(tier.get("nope").is_none());
    }

    #[test]
    fn invalidate_drops_key() {
        let tier = MemoryTier::new(16, Duration::from_secs(60));
        tier.insert("k".to_string(), Arc::new(vec![]));
        tier.invalidate("k");
        assert!(tier.get("k").is_none());
    }
}
