//! The orchestration facade.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use tally_cache::PatternCache;
use tally_confidence::ConfidenceCalculator;
use tally_core::constants::DEFAULT_SCOPE;
use tally_core::models::{
    BatchLearnReport, CategorizationResult, ConfidenceBreakdown, CorrectionEvent, ExpenseSnapshot,
    LearnOutcome, MatchResult,
};
use tally_core::traits::{IPatternStore, ISharedCache};
use tally_core::{TallyConfig, TallyResult};
use tally_learning::PatternLearner;
use tally_match::{FuzzyMatcher, MatchOptions};
use tally_storage::StoreEngine;

use crate::{categorize_span, learn_batch_span, learn_span, maintenance_span};

/// What one maintenance pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaintenanceReport {
    /// Patterns whose weight decayed for staleness.
    pub decayed: usize,
    /// Patterns retired by the success-rate floor.
    pub retired: usize,
}

pub struct Engine {
    cache: Arc<PatternCache>,
    matcher: FuzzyMatcher,
    calculator: ConfidenceCalculator,
    learner: PatternLearner,
    store: Arc<dyn IPatternStore>,
    config: TallyConfig,
}

impl Engine {
    /// Wire an engine over an injected store and optional shared cache
    /// tier. No global state; two engines over the same store are two
    /// independent views.
    pub fn new(
        store: Arc<dyn IPatternStore>,
        shared: Option<Arc<dyn ISharedCache>>,
        config: TallyConfig,
    ) -> Self {
        let cache = Arc::new(PatternCache::new(
            store.clone(),
            shared,
            config.cache.clone(),
        ));
        let matcher = FuzzyMatcher::new(&config);
        let calculator = ConfidenceCalculator::new(&config);
        let learner = PatternLearner::new(store.clone(), cache.clone(), &config);
        Self {
            cache,
            matcher,
            calculator,
            learner,
            store,
            config,
        }
    }

    /// Convenience constructor over a file-backed SQLite store.
    pub fn open(path: &Path, config: TallyConfig) -> TallyResult<Self> {
        let store = Arc::new(StoreEngine::open(path)?);
        Ok(Self::new(store, None, config))
    }

    /// Pre-populate the cache for the scopes a deployment serves.
    /// Best-effort; a cold cache is a latency problem, not a correctness
    /// one.
    pub fn warm(&self, scopes: &[&str]) {
        self.cache.warm(scopes);
    }

    /// Flush cached state. The store is the source of truth; nothing else
    /// needs a goodbye.
    pub fn shutdown(&self) {
        self.cache.invalidate(None);
        info!("engine shut down");
    }

    /// Categorize one expense. Read-only and safe from any number of
    /// concurrent callers; a candidate whose scoring fails is skipped, not
    /// fatal.
    pub fn categorize(
        &self,
        expense: &ExpenseSnapshot,
        scope: Option<&str>,
    ) -> TallyResult<CategorizationResult> {
        let scope = scope.unwrap_or(DEFAULT_SCOPE);
        let _span = categorize_span!(expense.primary_text(), scope).entered();

        let patterns = self.cache.fetch(scope)?;
        if patterns.is_empty() {
            return Ok(CategorizationResult::no_match(
                "no active patterns in scope",
            ));
        }

        let options = MatchOptions::default()
            .with_threshold(self.config.matcher.threshold)
            .with_context(expense.amount, expense.transaction_time);
        let matches = self
            .matcher
            .match_patterns(expense.primary_text(), &patterns, &options);
        if matches.is_empty() {
            return Ok(CategorizationResult::no_match(
                "no pattern matched above the similarity threshold",
            ));
        }

        let candidates = matches.len();
        let mut skipped = 0usize;
        let mut best: Option<(f64, ConfidenceBreakdown, MatchResult)> = None;
        for result in matches {
            match self
                .calculator
                .calculate(expense, &result.pattern, Some(&result))
            {
                Ok((confidence, breakdown)) => {
                    if best.as_ref().map_or(true, |(b, _, _)| confidence > *b) {
                        best = Some((confidence, breakdown, result));
                    }
                }
                Err(e) => {
                    warn!(
                        pattern_id = %result.pattern.id,
                        error = %e,
                        "skipping candidate that failed confidence scoring"
                    );
                    skipped += 1;
                }
            }
        }

        let Some((confidence, breakdown, winner)) = best else {
            return Ok(CategorizationResult::no_match(
                "every matching candidate failed confidence scoring",
            )
            .with_error("all candidates skipped"));
        };

        if confidence < self.calculator.accept_threshold() {
            return Ok(CategorizationResult::no_match(&format!(
                "best candidate {:.2} below accept threshold {:.2}",
                confidence,
                self.calculator.accept_threshold()
            )));
        }

        let explanation = format!(
            "matched '{}' ({:?}, similarity {:.2}) out of {} candidates",
            winner.pattern.pattern_value, winner.algorithm_used, winner.raw_score, candidates
        );
        let mut outcome = CategorizationResult::matched(
            winner.pattern.category_id.clone(),
            confidence,
            vec![winner.pattern.id.clone()],
            breakdown,
            explanation,
        );
        if skipped > 0 {
            outcome = outcome.with_error(&format!("{skipped} candidates skipped during scoring"));
        }
        Ok(outcome)
    }

    /// Feed one confirmed category back into the pattern set.
    pub fn learn(
        &self,
        expense: &ExpenseSnapshot,
        correct_category: &str,
        predicted: Option<&str>,
    ) -> TallyResult<LearnOutcome> {
        let _span = learn_span!(correct_category).entered();
        let event = CorrectionEvent::new(
            expense.clone(),
            predicted.map(String::from),
            correct_category,
        );
        self.learner.apply_correction(&event)
    }

    /// Apply a batch of corrections.
    pub fn learn_batch(&self, events: &[CorrectionEvent]) -> TallyResult<BatchLearnReport> {
        let _span = learn_batch_span!(events.len()).entered();
        self.learner.apply_batch(events)
    }

    /// Periodic upkeep: decay stale weights, retire chronic offenders.
    pub fn maintenance(&self) -> TallyResult<MaintenanceReport> {
        let _span = maintenance_span!().entered();
        let now = Utc::now();

        let decayed = self.learner.decay_sweep(now)?;

        let mut retired = 0usize;
        for pattern in self.store.list_active(DEFAULT_SCOPE)? {
            if pattern.should_retire() {
                self.store.retire(&pattern.id)?;
                info!(
                    pattern_id = %pattern.id,
                    success_rate = pattern.success_rate(),
                    "pattern retired during maintenance"
                );
                retired += 1;
            }
        }
        if retired > 0 {
            self.cache.invalidate(None);
        }

        info!(decayed, retired, "maintenance pass complete");
        Ok(MaintenanceReport { decayed, retired })
    }

    pub fn cache(&self) -> &PatternCache {
        &self.cache
    }
}
