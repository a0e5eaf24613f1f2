//! Default values for every config knob, in one place.

/// In-process tier TTL (seconds). Short, bounds staleness after external edits.
pub const DEFAULT_LOCAL_TTL_SECS: u64 = 300;

/// Shared tier TTL (seconds). Long, a durability backstop.
pub const DEFAULT_SHARED_TTL_SECS: u64 = 86_400;

/// Max entries in the in-process tier.
pub const DEFAULT_LOCAL_MAX_ENTRIES: u64 = 1024;

/// Budget for one shared-tier round trip (milliseconds).
pub const DEFAULT_SHARED_TIER_BUDGET_MS: u64 = 50;

/// Consecutive shared-tier failures before the breaker opens.
pub const DEFAULT_BREAKER_FAILURE_THRESHOLD: u32 = 5;

/// How long the breaker stays open before probing (seconds).
pub const DEFAULT_BREAKER_COOLDOWN_SECS: u64 = 30;

/// Minimum similarity for a fuzzy match.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.8;

/// Wall-clock budget for one regex evaluation (milliseconds).
pub const DEFAULT_REGEX_BUDGET_MS: u64 = 25;

/// Jaro-Winkler share of the combined similarity.
pub const DEFAULT_JARO_WEIGHT: f64 = 0.7;

/// Trigram share of the combined similarity.
pub const DEFAULT_TRIGRAM_WEIGHT: f64 = 0.3;

/// Confidence a candidate must reach to be returned as the category.
pub const DEFAULT_ACCEPT_THRESHOLD: f64 = 0.5;

/// Factor weights.
pub const DEFAULT_TEXT_WEIGHT: f64 = 0.35;
pub const DEFAULT_HISTORICAL_WEIGHT: f64 = 0.25;
pub const DEFAULT_FREQUENCY_WEIGHT: f64 = 0.15;
pub const DEFAULT_AMOUNT_WEIGHT: f64 = 0.15;
pub const DEFAULT_TEMPORAL_WEIGHT: f64 = 0.10;

/// Usage a pattern needs before its success rate counts as a factor.
pub const DEFAULT_HISTORICAL_MIN_USAGE: u64 = 5;

/// Logistic squash steepness.
pub const DEFAULT_LOGISTIC_STEEPNESS: f64 = 10.0;
