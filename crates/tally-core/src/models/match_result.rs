use serde::{Deserialize, Serialize};

use crate::pattern::Pattern;

/// Which similarity algorithm produced a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchAlgorithm {
    Exact,
    JaroWinkler,
    TrigramJaccard,
    /// 0.7 Jaro-Winkler + 0.3 trigram blend.
    Combined,
    AmountRange,
    TimePattern,
    Regex,
}

/// How the pattern matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Exact,
    Fuzzy,
    Range,
    Regex,
}

/// One matching attempt against one candidate pattern. Ephemeral — owned
/// exclusively by the call that produced it, never persisted.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// The candidate that matched.
    pub pattern: Pattern,
    /// Similarity in [0.0, 1.0].
    pub raw_score: f64,
    /// Algorithm that produced `raw_score`.
    pub algorithm_used: MatchAlgorithm,
    /// Shape of the match.
    pub match_type: MatchType,
}

impl MatchResult {
    pub fn new(
        pattern: Pattern,
        raw_score: f64,
        algorithm_used: MatchAlgorithm,
        match_type: MatchType,
    ) -> Self {
        Self {
            pattern,
            raw_score: raw_score.clamp(0.0, 1.0),
            algorithm_used,
            match_type,
        }
    }
}
