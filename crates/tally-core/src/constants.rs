/// Tally system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default scope when the caller does not partition patterns.
pub const DEFAULT_SCOPE: &str = "all";

/// Minimum similarity for a fuzzy match to count at all.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.8;

/// Textual similarity at or above which two sibling patterns are merged.
pub const MERGE_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Same correction must recur this many times before a pattern is created.
pub const CREATION_RECURRENCE_THRESHOLD: u32 = 3;

/// Retirement rule: usage above this with a success rate below
/// [`RETIREMENT_SUCCESS_RATE`] retires the pattern.
pub const RETIREMENT_USAGE_COUNT: u64 = 50;
pub const RETIREMENT_SUCCESS_RATE: f64 = 0.3;

/// Patterns untouched for this many days lose weight on the next sweep.
pub const DECAY_STALE_DAYS: i64 = 30;

/// Multiplier applied to `confidence_weight` per decay sweep.
pub const DECAY_FACTOR: f64 = 0.9;

/// Maximum accepted regex pattern length.
pub const MAX_REGEX_LENGTH: usize = 100;

/// Maximum span of an accepted amount range.
pub const MAX_AMOUNT_SPAN: f64 = 10_000.0;

/// Maximum batch size for bulk learning.
pub const MAX_BATCH_SIZE: usize = 1000;
