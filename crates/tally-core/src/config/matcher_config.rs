use serde::{Deserialize, Serialize};

use super::defaults;

/// Fuzzy matcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Minimum similarity for a candidate to be kept.
    pub threshold: f64,
    /// Jaro-Winkler share of the combined score.
    pub jaro_weight: f64,
    /// Trigram share of the combined score.
    pub trigram_weight: f64,
    /// Wall-clock budget per regex evaluation (milliseconds).
    pub regex_budget_ms: u64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: defaults::DEFAULT_MATCH_THRESHOLD,
            jaro_weight: defaults::DEFAULT_JARO_WEIGHT,
            trigram_weight: defaults::DEFAULT_TRIGRAM_WEIGHT,
            regex_budget_ms: defaults::DEFAULT_REGEX_BUDGET_MS,
        }
    }
}
