//! The correction pipeline: penalize, reinforce-or-create, merge, retire.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use tally_cache::PatternCache;
use tally_core::config::LearningConfig;
use tally_core::constants::DEFAULT_SCOPE;
use tally_core::errors::{LearningError, StoreError};
use tally_core::models::{CorrectionEvent, LearnOutcome};
use tally_core::pattern::{Pattern, PatternType};
use tally_core::traits::IPatternStore;
use tally_core::validation;
use tally_core::{TallyConfig, TallyError, TallyResult};
use tally_match::algorithms::windowed_ratio;
use tally_match::normalize::normalize;

use crate::tally::CorrectionTally;

/// Pause before the single conflict retry, enough for the competing writer
/// to finish.
const CONFLICT_BACKOFF: Duration = Duration::from_millis(25);

pub struct PatternLearner {
    store: Arc<dyn IPatternStore>,
    cache: Arc<PatternCache>,
    pub(crate) config: LearningConfig,
    /// Similarity for "this correction refers to that pattern".
    match_threshold: f64,
    tally: CorrectionTally,
}

impl PatternLearner {
    pub fn new(
        store: Arc<dyn IPatternStore>,
        cache: Arc<PatternCache>,
        config: &TallyConfig,
    ) -> Self {
        Self {
            store,
            cache,
            config: config.learning.clone(),
            match_threshold: config.matcher.threshold,
            tally: CorrectionTally::new(),
        }
    }

    /// Apply one correction. Ordering matters: penalties land before the
    /// reinforcement so a merge sees final counters, and the cache is
    /// invalidated last so readers never observe a half-applied correction.
    pub fn apply_correction(&self, event: &CorrectionEvent) -> TallyResult<LearnOutcome> {
        if let Err(reason) = crate::batch::validate_correction(event) {
            return Err(TallyError::Learning(LearningError::MalformedCorrection {
                index: 0,
                reason,
            }));
        }

        let now = Utc::now();
        let line = normalize(event.expense.primary_text());
        let mut outcome = LearnOutcome::default();

        if event.was_misprediction() {
            if let Some(predicted) = event.predicted_category.as_deref() {
                self.penalize(&line, predicted, now, &mut outcome)?;
            }
        }

        if let Some(reinforced) = self.reinforce_or_create(&line, event, now, &mut outcome)? {
            outcome.reinforced = Some(reinforced.id.clone());
            self.merge_siblings(reinforced, now, &mut outcome)?;
        }

        self.invalidate_after(event);
        debug!(
            merchant = %line,
            correct = %event.correct_category,
            penalized = outcome.penalized.len(),
            created = outcome.created,
            "correction applied"
        );
        Ok(outcome)
    }

    /// Active merchant patterns in a category whose stored value matches
    /// the normalized statement line, strongest first. Statement lines
    /// carry store numbers and location tails, so the comparison slides
    /// the pattern value across the line instead of scoring it whole.
    fn matching_patterns(
        &self,
        line: &str,
        category: &str,
        threshold: f64,
    ) -> TallyResult<Vec<Pattern>> {
        let mut scored: Vec<(f64, Pattern)> = self
            .store
            .list_active(category)?
            .into_iter()
            .filter(|p| p.pattern_type == PatternType::Merchant)
            .filter_map(|p| {
                let ratio = windowed_ratio(line, &normalize(&p.pattern_value));
                if ratio >= threshold {
                    Some((ratio, p))
                } else {
                    None
                }
            })
            .collect();
        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(scored.into_iter().map(|(_, p)| p).collect())
    }

    /// Record a failure on every active pattern that would have voted the
    /// wrong way, retiring the ones that fall below the floor.
    fn penalize(
        &self,
        line: &str,
        predicted: &str,
        now: DateTime<Utc>,
        outcome: &mut LearnOutcome,
    ) -> TallyResult<()> {
        let culprits = self.matching_patterns(line, predicted, self.match_threshold)?;
        for culprit in culprits {
            let updated = self.update_with_retry(&culprit.id, |p| p.record_failure(now))?;
            outcome.penalized.push(updated.id.clone());
            if updated.should_retire() {
                self.store.retire(&updated.id)?;
                info!(
                    pattern_id = %updated.id,
                    usage = updated.usage_count,
                    success_rate = updated.success_rate(),
                    "pattern retired for chronic misprediction"
                );
                outcome.retired.push(updated.id);
            }
        }
        Ok(())
    }

    /// Reinforce the matching pattern in the correct category, or create one
    /// once the correction has recurred often enough.
    fn reinforce_or_create(
        &self,
        line: &str,
        event: &CorrectionEvent,
        now: DateTime<Utc>,
        outcome: &mut LearnOutcome,
    ) -> TallyResult<Option<Pattern>> {
        let existing =
            self.matching_patterns(line, &event.correct_category, self.match_threshold)?;

        if let Some(first) = existing.first() {
            let amount = event.expense.amount;
            let at = event.expense.transaction_time;
            let updated = self.update_with_retry(&first.id, |p| {
                p.record_success(now);
                p.metadata.observe_amount(amount);
                p.metadata.observe_time(at);
            })?;
            return Ok(Some(updated));
        }

        let Some(stem) = merchant_stem(line) else {
            warn!(
                merchant = %line,
                "statement text yields no usable merchant value, creation skipped"
            );
            return Ok(None);
        };

        let seen = self.tally.record(&stem, &event.correct_category);
        if seen < self.config.creation_threshold {
            debug!(
                merchant = %stem,
                category = %event.correct_category,
                seen,
                needed = self.config.creation_threshold,
                "correction tallied, below creation threshold"
            );
            return Ok(None);
        }

        let mut pattern = Pattern::new(&event.correct_category, PatternType::Merchant, &stem);
        pattern.record_success(now);
        pattern.metadata.observe_amount(event.expense.amount);
        pattern.metadata.observe_time(event.expense.transaction_time);
        let created = self.store.create(&pattern)?;
        self.tally.forget(&stem, &event.correct_category);
        info!(
            pattern_id = %created.id,
            category = %created.category_id,
            value = %created.pattern_value,
            "pattern created after recurring corrections"
        );
        outcome.created = true;
        Ok(Some(created))
    }

    /// Collapse near-duplicate siblings into the stronger pattern. The
    /// higher success rate survives; counts are pooled so no history is
    /// lost.
    fn merge_siblings(
        &self,
        seed: Pattern,
        now: DateTime<Utc>,
        outcome: &mut LearnOutcome,
    ) -> TallyResult<()> {
        let siblings = self.store.find_similar(
            seed.pattern_type,
            &seed.pattern_value,
            &seed.category_id,
            self.config.merge_threshold,
        )?;
        let mut keeper = seed;
        for sibling in siblings {
            if sibling.id == keeper.id || !sibling.active {
                continue;
            }
            if keeper.success_rate() >= sibling.success_rate() {
                self.store.retire(&sibling.id)?;
                keeper = self.update_with_retry(&keeper.id, |p| p.absorb(&sibling, now))?;
                info!(
                    keeper = %keeper.id,
                    absorbed = %sibling.id,
                    "merged near-duplicate pattern"
                );
                outcome.retired.push(sibling.id.clone());
                outcome.merged_into.push(keeper.id.clone());
            } else {
                self.store.retire(&keeper.id)?;
                let absorbed = keeper.clone();
                let survivor =
                    self.update_with_retry(&sibling.id, |p| p.absorb(&absorbed, now))?;
                info!(
                    keeper = %survivor.id,
                    absorbed = %absorbed.id,
                    "merged near-duplicate pattern"
                );
                outcome.retired.push(absorbed.id.clone());
                outcome.merged_into.push(survivor.id.clone());
                keeper = survivor;
            }
        }
        Ok(())
    }

    /// Read-mutate-update with a single retry when another writer got there
    /// first.
    pub(crate) fn update_with_retry<F>(&self, id: &str, mutate: F) -> TallyResult<Pattern>
    where
        F: Fn(&mut Pattern),
    {
        let mut pattern = self.fetch_required(id)?;
        mutate(&mut pattern);
        match self.store.update(&pattern) {
            Ok(updated) => Ok(updated),
            Err(TallyError::Store(StoreError::Conflict { .. })) => {
                std::thread::sleep(CONFLICT_BACKOFF);
                let mut fresh = self.fetch_required(id)?;
                mutate(&mut fresh);
                self.store.update(&fresh)
            }
            Err(e) => Err(e),
        }
    }

    fn fetch_required(&self, id: &str) -> TallyResult<Pattern> {
        self.store.get(id)?.ok_or_else(|| {
            TallyError::Store(StoreError::NotFound { id: id.to_string() })
        })
    }

    /// Every mutation invalidates the scopes a reader could have cached.
    fn invalidate_after(&self, event: &CorrectionEvent) {
        self.cache.invalidate(Some(DEFAULT_SCOPE));
        self.cache.invalidate(Some(&event.correct_category));
        if let Some(predicted) = event.predicted_category.as_deref() {
            if predicted != event.correct_category {
                self.cache.invalidate(Some(predicted));
            }
        }
    }

    pub(crate) fn store(&self) -> &dyn IPatternStore {
        self.store.as_ref()
    }

    pub(crate) fn cache(&self) -> &PatternCache {
        &self.cache
    }
}

/// The shortest leading token window of a normalized statement line that
/// can stand as a merchant pattern value. Card networks put the merchant
/// name first with store number, city and state trailing it, so a valid
/// leading window is the merchant. None when no window passes boundary
/// validation, such as a lone stopword.
fn merchant_stem(line: &str) -> Option<String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    for end in 1..=tokens.len() {
        let stem = tokens[..end].join(" ");
        if validation::validate_pattern_value(PatternType::Merchant, &stem).is_ok() {
            return Some(stem);
        }
    }
    None
}
