use std::collections::HashMap;

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Adaptive metadata accumulated as a pattern matches real expenses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternMetadata {
    /// Running mean of matched amounts, if any amount has been observed.
    pub typical_amount: Option<f64>,
    /// Number of amounts folded into `typical_amount`.
    pub amount_observations: u64,
    /// Day/hour signature of observed matches.
    pub temporal: Option<TemporalSignature>,
    /// Free-form key/value annotations.
    pub extra: HashMap<String, String>,
}

impl PatternMetadata {
    /// Fold one observed amount into the running mean.
    pub fn observe_amount(&mut self, amount: f64) {
        let n = self.amount_observations as f64;
        let mean = self.typical_amount.unwrap_or(0.0);
        self.typical_amount = Some((mean * n + amount) / (n + 1.0));
        self.amount_observations += 1;
    }

    /// Fold one observed timestamp into the temporal signature.
    pub fn observe_time(&mut self, at: DateTime<Utc>) {
        self.temporal.get_or_insert_with(TemporalSignature::default).observe(at);
    }
}

/// Histogram of when a pattern tends to match: hour-of-day and weekday
/// counts, enough to score temporal closeness without storing raw events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalSignature {
    /// Counts per hour of day, 0-23.
    pub hour_counts: [u64; 24],
    /// Counts per weekday, Monday = 0.
    pub weekday_counts: [u64; 7],
    /// Total observations.
    pub total: u64,
}

impl Default for TemporalSignature {
    fn default() -> Self {
        Self {
            hour_counts: [0; 24],
            weekday_counts: [0; 7],
            total: 0,
        }
    }
}

impl TemporalSignature {
    /// Record one observation.
    pub fn observe(&mut self, at: DateTime<Utc>) {
        self.hour_counts[at.hour() as usize] += 1;
        self.weekday_counts[at.weekday().num_days_from_monday() as usize] += 1;
        self.total += 1;
    }

    /// Fraction of observations that fall in the same hour (±1) and weekday
    /// as `at`. Returns None when nothing has been observed.
    pub fn closeness(&self, at: DateTime<Utc>) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        let hour = at.hour() as usize;
        let near_hours: u64 = [23 + hour, 24 + hour, 25 + hour]
            .iter()
            .map(|h| self.hour_counts[h % 24])
            .sum();
        let weekday = self.weekday_counts[at.weekday().num_days_from_monday() as usize];
        let hour_score = near_hours as f64 / self.total as f64;
        let weekday_score = weekday as f64 / self.total as f64;
        Some(((hour_score + weekday_score) / 2.0).clamp(0.0, 1.0))
    }
}
