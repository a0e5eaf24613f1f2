use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::metadata::PatternMetadata;
use super::pattern_type::PatternType;
use super::stage::PatternStage;
use super::weight::Weight;
use crate::constants::{RETIREMENT_SUCCESS_RATE, RETIREMENT_USAGE_COUNT};

/// A categorization rule. Every rule in the system is a Pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pattern {
    /// UUID v4 identifier.
    pub id: String,
    /// The category this pattern votes for.
    pub category_id: String,
    /// What kind of signal this pattern matches.
    pub pattern_type: PatternType,
    /// Normalized text, "min-max" amount range, time pattern, or regex.
    pub pattern_value: String,
    /// Prior belief, decays with disuse.
    pub confidence_weight: Weight,
    /// Times this pattern produced a prediction.
    pub usage_count: u64,
    /// Times the prediction was confirmed correct. Never exceeds usage_count.
    pub success_count: u64,
    /// Whether the pattern participates in matching.
    pub active: bool,
    /// Adaptive metadata: typical amount, temporal signature, annotations.
    #[serde(default)]
    pub metadata: PatternMetadata,
    /// Last time this pattern matched an expense.
    pub last_matched_at: Option<DateTime<Utc>>,
    /// When the pattern was created.
    pub created_at: DateTime<Utc>,
    /// Last mutation of any kind.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency counter, bumped by the store on every update.
    #[serde(default)]
    pub version: u64,
}

impl Pattern {
    /// Create a fresh pattern with zeroed statistics.
    pub fn new(category_id: &str, pattern_type: PatternType, pattern_value: &str) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            category_id: category_id.to_string(),
            pattern_type,
            pattern_value: pattern_value.to_string(),
            confidence_weight: Weight::default(),
            usage_count: 0,
            success_count: 0,
            active: true,
            metadata: PatternMetadata::default(),
            last_matched_at: None,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    /// success_count / usage_count, or 0.0 when unused.
    pub fn success_rate(&self) -> f64 {
        if self.usage_count == 0 {
            0.0
        } else {
            self.success_count as f64 / self.usage_count as f64
        }
    }

    /// Derived quality score, 0-100: success rate dominates, with a track
    /// record bonus that saturates at 100 uses.
    pub fn quality_score(&self) -> f64 {
        let track = (self.usage_count.min(100) as f64) / 100.0;
        (self.success_rate() * 70.0 + track * 30.0).clamp(0.0, 100.0)
    }

    /// Current lifecycle stage, derived from the counters.
    pub fn stage(&self) -> PatternStage {
        PatternStage::classify(self.usage_count, self.success_rate(), self.active)
    }

    /// Record a confirmed-correct match. Keeps success_count <= usage_count
    /// by construction.
    pub fn record_success(&mut self, at: DateTime<Utc>) {
        self.usage_count += 1;
        self.success_count += 1;
        self.last_matched_at = Some(at);
        self.updated_at = at;
    }

    /// Record a confirmed-incorrect match.
    pub fn record_failure(&mut self, at: DateTime<Utc>) {
        self.usage_count += 1;
        self.last_matched_at = Some(at);
        self.updated_at = at;
    }

    /// Whether the retirement rule applies: heavily used and failing.
    pub fn should_retire(&self) -> bool {
        self.usage_count > RETIREMENT_USAGE_COUNT && self.success_rate() < RETIREMENT_SUCCESS_RATE
    }

    /// Absorb another pattern's history during a merge. Usage history is
    /// conserved: counts are summed, never dropped.
    pub fn absorb(&mut self, other: &Pattern, at: DateTime<Utc>) {
        self.usage_count += other.usage_count;
        self.success_count += other.success_count;
        debug_assert!(self.success_count <= self.usage_count);
        if let (Some(a), Some(b)) = (other.last_matched_at, self.last_matched_at) {
            self.last_matched_at = Some(a.max(b));
        } else {
            self.last_matched_at = self.last_matched_at.or(other.last_matched_at);
        }
        // Pool amount observations, weighted by observation counts.
        let (n_a, n_b) = (
            self.metadata.amount_observations,
            other.metadata.amount_observations,
        );
        if n_a + n_b > 0 {
            let sum_a = self.metadata.typical_amount.unwrap_or(0.0) * n_a as f64;
            let sum_b = other.metadata.typical_amount.unwrap_or(0.0) * n_b as f64;
            self.metadata.typical_amount = Some((sum_a + sum_b) / (n_a + n_b) as f64);
            self.metadata.amount_observations = n_a + n_b;
        }
        self.updated_at = at;
    }

    /// Deactivate the pattern. Terminal.
    pub fn retire(&mut self, at: DateTime<Utc>) {
        self.active = false;
        self.updated_at = at;
    }

    /// blake3 hash of the normalized identity triple, used as a dedup and
    /// tally key.
    pub fn identity_hash(&self) -> String {
        identity_hash(self.pattern_type, &self.pattern_value, &self.category_id)
    }
}

/// Hash of the (type, value, category) triple that must be unique among
/// active patterns.
pub fn identity_hash(pattern_type: PatternType, value: &str, category_id: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(pattern_type.as_str().as_bytes());
    hasher.update(b"\x1f");
    hasher.update(value.as_bytes());
    hasher.update(b"\x1f");
    hasher.update(category_id.as_bytes());
    hasher.finalize().to_hex().to_string()
}

/// Identity equality: two patterns are equal if they have the same ID.
/// For content comparison use the individual fields.
impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
