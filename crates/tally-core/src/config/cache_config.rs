use serde::{Deserialize, Serialize};

use super::defaults;

/// Pattern cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// In-process tier TTL (seconds).
    pub local_ttl_secs: u64,
    /// Shared tier TTL (seconds).
    pub shared_ttl_secs: u64,
    /// Max scopes held in the in-process tier.
    pub local_max_entries: u64,
    /// Budget for one shared-tier round trip (milliseconds).
    pub shared_tier_budget_ms: u64,
    /// Consecutive failures before the breaker opens.
    pub breaker_failure_threshold: u32,
    /// Open-state cool-down before a half-open probe (seconds).
    pub breaker_cooldown_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            local_ttl_secs: defaults::DEFAULT_LOCAL_TTL_SECS,
            shared_ttl_secs: defaults::DEFAULT_SHARED_TTL_SECS,
            local_max_entries: defaults::DEFAULT_LOCAL_MAX_ENTRIES,
            shared_tier_budget_ms: defaults::DEFAULT_SHARED_TIER_BUDGET_MS,
            breaker_failure_threshold: defaults::DEFAULT_BREAKER_FAILURE_THRESHOLD,
            breaker_cooldown_secs: defaults::DEFAULT_BREAKER_COOLDOWN_SECS,
        }
    }
}
