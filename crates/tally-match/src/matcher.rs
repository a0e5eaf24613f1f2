//! The fuzzy matcher: ranks candidate patterns against a query.

use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::warn;

use tally_core::errors::MatchError;
use tally_core::models::{MatchAlgorithm, MatchResult, MatchType};
use tally_core::pattern::{AmountRange, Pattern, PatternType, TimePattern};
use tally_core::traits::MatchSource;
use tally_core::TallyConfig;

use crate::normalize;
use crate::pipeline::{PipelineScore, TextPipeline};

/// Compiled regex size limit, matching the boundary validation limit.
const REGEX_SIZE_LIMIT: usize = 1 << 16;

/// Per-call matching options.
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Candidates scoring below this are dropped.
    pub threshold: f64,
    /// When false, raw strings are compared without normalization.
    pub normalize: bool,
    /// Force a single algorithm instead of the weighted blend.
    pub algorithm: Option<MatchAlgorithm>,
    /// Expense amount, enables amount_range candidates.
    pub amount: Option<f64>,
    /// Expense timestamp, enables time candidates.
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: tally_core::constants::DEFAULT_MATCH_THRESHOLD,
            normalize: true,
            algorithm: None,
            amount: None,
            timestamp: None,
        }
    }
}

impl MatchOptions {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_context(mut self, amount: f64, timestamp: DateTime<Utc>) -> Self {
        self.amount = Some(amount);
        self.timestamp = Some(timestamp);
        self
    }
}

/// Ranks candidate patterns by similarity to a query string. Stateless
/// apart from configuration; safe to share across threads.
pub struct FuzzyMatcher {
    jaro_weight: f64,
    trigram_weight: f64,
    regex_budget_ms: u64,
}

impl FuzzyMatcher {
    pub fn new(config: &TallyConfig) -> Self {
        Self {
            jaro_weight: config.matcher.jaro_weight,
            trigram_weight: config.matcher.trigram_weight,
            regex_budget_ms: config.matcher.regex_budget_ms,
        }
    }

    /// Compare two text sources through the standard pipeline. The
    /// extraction policy of each source type decides which field is
    /// compared; no type inspection happens here.
    pub fn similarity<A, B>(&self, a: &A, b: &B) -> f64
    where
        A: MatchSource + ?Sized,
        B: MatchSource + ?Sized,
    {
        let pipeline = TextPipeline::standard(self.jaro_weight, self.trigram_weight);
        let qa = normalize::normalize(a.match_text());
        let qb = normalize::normalize(b.match_text());
        pipeline.run(&qa, &qb).score
    }

    /// Match a query against candidate patterns, returning results sorted
    /// by descending score, filtered to `options.threshold`.
    ///
    /// A failure on one candidate (bad regex, blown budget) skips that
    /// candidate and never aborts the batch.
    pub fn match_patterns(
        &self,
        query: &str,
        candidates: &[Pattern],
        options: &MatchOptions,
    ) -> Vec<MatchResult> {
        let normalized;
        let query_text = if options.normalize {
            normalized = normalize::normalize(query);
            normalized.as_str()
        } else {
            query
        };

        let pipeline = match options.algorithm {
            Some(algorithm) => TextPipeline::single(algorithm),
            None => TextPipeline::standard(self.jaro_weight, self.trigram_weight),
        };

        let mut results: Vec<MatchResult> = candidates
            .iter()
            .filter(|p| p.active)
            .filter_map(|pattern| self.score_candidate(query_text, query, pattern, &pipeline, options))
            .filter(|r| r.raw_score >= options.threshold)
            .collect();

        results.sort_by(|a, b| {
            b.raw_score
                .partial_cmp(&a.raw_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results
    }

    /// Score one candidate. Returns None when the pattern kind has no data
    /// to match against or its evaluation failed.
    fn score_candidate(
        &self,
        query_text: &str,
        raw_query: &str,
        pattern: &Pattern,
        pipeline: &TextPipeline,
        options: &MatchOptions,
    ) -> Option<MatchResult> {
        match pattern.pattern_type {
            PatternType::Merchant | PatternType::Keyword | PatternType::Description => {
                if query_text.is_empty() {
                    return None;
                }
                let candidate_text = if options.normalize {
                    normalize::normalize(pattern.match_text())
                } else {
                    pattern.match_text().to_string()
                };
                let verdict = best_window_score(pipeline, query_text, &candidate_text);
                Some(MatchResult::new(
                    pattern.clone(),
                    verdict.score,
                    verdict.algorithm,
                    verdict.match_type,
                ))
            }
            PatternType::AmountRange => {
                let amount = options.amount?;
                let range = AmountRange::parse(&pattern.pattern_value)?;
                Some(MatchResult::new(
                    pattern.clone(),
                    range.proximity(amount),
                    MatchAlgorithm::AmountRange,
                    MatchType::Range,
                ))
            }
            PatternType::Time => {
                let at = options.timestamp?;
                let time = TimePattern::parse(&pattern.pattern_value)?;
                let score = if time.contains(at) { 1.0 } else { 0.0 };
                Some(MatchResult::new(
                    pattern.clone(),
                    score,
                    MatchAlgorithm::TimePattern,
                    MatchType::Range,
                ))
            }
            PatternType::Regex => match self.score_regex(raw_query, pattern) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!(pattern_id = %pattern.id, error = %e, "regex candidate skipped");
                    None
                }
            },
        }
    }

    /// Evaluate a regex candidate. The compiled size limit and the boundary
    /// denylist keep evaluation linear; the wall-clock budget is checked
    /// after the fact and flags a candidate whose evaluation overran it, so
    /// an overrun drops that one result rather than aborting the match.
    fn score_regex(&self, raw_query: &str, pattern: &Pattern) -> Result<MatchResult, MatchError> {
        let started = Instant::now();
        let re = regex::RegexBuilder::new(&pattern.pattern_value)
            .case_insensitive(true)
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
            .map_err(|e| MatchError::BadRegex {
                pattern_id: pattern.id.clone(),
                reason: e.to_string(),
            })?;
        let matched = re.is_match(raw_query);
        let elapsed_ms = started.elapsed().as_millis() as u64;
        if elapsed_ms > self.regex_budget_ms {
            return Err(MatchError::Timeout {
                pattern_id: pattern.id.clone(),
                budget_ms: self.regex_budget_ms,
            });
        }
        Ok(MatchResult::new(
            pattern.clone(),
            if matched { 1.0 } else { 0.0 },
            MatchAlgorithm::Regex,
            MatchType::Regex,
        ))
    }
}

/// Score a candidate against the full query and against every candidate-sized
/// token window of it, keeping the best verdict. Merchant values are short
/// ("starbucks") while raw statement lines carry location and terminal noise
/// ("starbucks seattle wa"), so the whole-string score alone under-rates true
/// matches.
fn best_window_score(pipeline: &TextPipeline, query: &str, candidate: &str) -> PipelineScore {
    let mut best = pipeline.run(query, candidate);
    let candidate_tokens = candidate.split_whitespace().count();
    if candidate_tokens == 0 {
        return best;
    }
    let query_tokens: Vec<&str> = query.split_whitespace().collect();
    if query_tokens.len() <= candidate_tokens {
        return best;
    }
    for window in query_tokens.windows(candidate_tokens) {
        let verdict = pipeline.run(&window.join(" "), candidate);
        if verdict.score > best.score {
            best = verdict;
        }
    }
    best
}
