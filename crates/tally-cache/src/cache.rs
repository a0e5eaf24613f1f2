//! The pattern cache: in-process tier, shared tier, source of truth.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, info, warn};

use tally_core::config::CacheConfig;
use tally_core::errors::TallyResult;
use tally_core::pattern::Pattern;
use tally_core::traits::{IPatternStore, ISharedCache};

use crate::breaker::{BreakerState, CircuitBreaker};
use crate::memory_tier::MemoryTier;

/// Prefix for every shared-tier key this cache owns.
const KEY_PREFIX: &str = "tally:patterns:";

/// Serves the active pattern set for a scope with sub-millisecond hits.
/// Explicitly constructed and dependency-injected; no process-wide state.
pub struct PatternCache {
    local: MemoryTier,
    shared: Option<Arc<dyn ISharedCache>>,
    store: Arc<dyn IPatternStore>,
    breaker: CircuitBreaker,
    config: CacheConfig,
}

impl PatternCache {
    /// Build a cache over a store and an optional shared tier.
    pub fn new(
        store: Arc<dyn IPatternStore>,
        shared: Option<Arc<dyn ISharedCache>>,
        config: CacheConfig,
    ) -> Self {
        let local = MemoryTier::new(
            config.local_max_entries,
            Duration::from_secs(config.local_ttl_secs),
        );
        let breaker = CircuitBreaker::new(
            config.breaker_failure_threshold,
            Duration::from_secs(config.breaker_cooldown_secs),
        );
        Self {
            local,
            shared,
            store,
            breaker,
            config,
        }
    }

    /// Cache key: scope plus a day bucket, so entries roll over daily even
    /// when TTL eviction lags.
    fn key(scope: &str) -> String {
        format!("{KEY_PREFIX}{scope}:{}", Utc::now().format("%Y%m%d"))
    }

    /// Fetch the active pattern snapshot for a scope.
    ///
    /// Tier order: in-process, shared (through the breaker), store. Misses
    /// write back to both tiers. The returned Arc is a read-only snapshot;
    /// callers must not mutate pattern state through it.
    ///
    /// Shared-tier failures degrade to store reads with a warning — they
    /// never surface from this method.
    pub fn fetch(&self, scope: &str) -> TallyResult<Arc<Vec<Pattern>>> {
        let key = Self::key(scope);

        if let Some(snapshot) = self.local.get(&key) {
            return Ok(snapshot);
        }

        if let Some(snapshot) = self.fetch_shared(&key) {
            self.local.insert(key, snapshot.clone());
            return Ok(snapshot);
        }

        // Cold path: source of truth.
        let patterns = self.store.list_active(scope)?;
        debug!(scope, count = patterns.len(), "pattern cache cold load from store");
        let snapshot = Arc::new(patterns);
        self.local.insert(key.clone(), snapshot.clone());
        self.write_back_shared(&key, &snapshot);
        Ok(snapshot)
    }

    /// Try the shared tier. Returns None on miss, breaker rejection,
    /// decode failure, or error — all of which fall through to the store.
    fn fetch_shared(&self, key: &str) -> Option<Arc<Vec<Pattern>>> {
        let shared = self.shared.as_ref()?;
        if !self.breaker.allow() {
            debug!(key, "shared tier breaker open, skipping");
            return None;
        }
        let started = Instant::now();
        match shared.get(key) {
            Ok(Some(bytes)) => {
                self.observe_latency(started);
                match serde_json::from_slice::<Vec<Pattern>>(&bytes) {
                    Ok(patterns) => Some(Arc::new(patterns)),
                    Err(e) => {
                        warn!(key, error = %e, "shared tier entry undecodable, falling through");
                        None
                    }
                }
            }
            Ok(None) => {
                self.observe_latency(started);
                None
            }
            Err(e) => {
                self.breaker.record_failure();
                warn!(key, error = %e, "shared tier read failed, degrading to store");
                None
            }
        }
    }

    /// A round trip slower than the budget counts against the breaker: a
    /// tier that is technically up but crawling is treated as failing.
    fn observe_latency(&self, started: Instant) {
        let elapsed_ms = started.elapsed().as_millis() as u64;
        if elapsed_ms > self.config.shared_tier_budget_ms {
            warn!(elapsed_ms, budget_ms = self.config.shared_tier_budget_ms, "shared tier over budget");
            self.breaker.record_failure();
        } else {
            self.breaker.record_success();
        }
    }

    /// Best-effort shared-tier write-back.
    fn write_back_shared(&self, key: &str, snapshot: &Arc<Vec<Pattern>>) {
        let Some(shared) = self.shared.as_ref() else {
            return;
        };
        if !self.breaker.allow() {
            return;
        }
        match serde_json::to_vec(snapshot.as_ref()) {
            Ok(bytes) => {
                let ttl = Duration::from_secs(self.config.shared_ttl_secs);
                if let Err(e) = shared.set(key, bytes, ttl) {
                    self.breaker.record_failure();
                    warn!(key, error = %e, "shared tier write-back failed");
                }
            }
            Err(e) => warn!(key, error = %e, "snapshot serialization failed"),
        }
    }

    /// Clear cached entries. None flushes everything; Some clears one
    /// scope in both tiers. Called by the learner after any mutation.
    pub fn invalidate(&self, scope: Option<&str>) {
        match scope {
            None => {
                self.local.clear();
                if let Some(shared) = self.shared.as_ref() {
                    if let Err(e) = shared.delete_matching(KEY_PREFIX) {
                        warn!(error = %e, "shared tier full flush failed");
                    }
                }
                info!("pattern cache fully invalidated");
            }
            Some(scope) => {
                self.local.invalidate(&Self::key(scope));
                if let Some(shared) = self.shared.as_ref() {
                    let prefix = format!("{KEY_PREFIX}{scope}:");
                    if let Err(e) = shared.delete_matching(&prefix) {
                        warn!(scope, error = %e, "shared tier scope invalidation failed");
                    }
                }
                debug!(scope, "pattern cache scope invalidated");
            }
        }
    }

    /// Pre-populate the in-process tier. Best-effort: failures are logged
    /// and never block the first real request, which will cold-miss to the
    /// store instead.
    pub fn warm(&self, scopes: &[&str]) {
        for scope in scopes {
            match self.fetch(scope) {
                Ok(snapshot) => {
                    info!(scope, count = snapshot.len(), "pattern cache warmed")
                }
                Err(e) => warn!(scope, error = %e, "cache warm failed, first request will cold load"),
            }
        }
    }

    /// Shared-tier breaker state, for health reporting.
    pub fn breaker_state(&self) -> BreakerState {
        self.breaker.state()
    }
}
