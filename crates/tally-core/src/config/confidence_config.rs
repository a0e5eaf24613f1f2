use serde::{Deserialize, Serialize};

use super::defaults;

/// Confidence calculator configuration: factor weights and calibration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    pub text_weight: f64,
    pub historical_weight: f64,
    pub frequency_weight: f64,
    pub amount_weight: f64,
    pub temporal_weight: f64,
    /// Usage a pattern needs before its success rate counts.
    pub historical_min_usage: u64,
    /// Steepness of the logistic squash.
    pub logistic_steepness: f64,
    /// Confidence required to return a category at all.
    pub accept_threshold: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            text_weight: defaults::DEFAULT_TEXT_WEIGHT,
            historical_weight: defaults::DEFAULT_HISTORICAL_WEIGHT,
            frequency_weight: defaults::DEFAULT_FREQUENCY_WEIGHT,
            amount_weight: defaults::DEFAULT_AMOUNT_WEIGHT,
            temporal_weight: defaults::DEFAULT_TEMPORAL_WEIGHT,
            historical_min_usage: defaults::DEFAULT_HISTORICAL_MIN_USAGE,
            logistic_steepness: defaults::DEFAULT_LOGISTIC_STEEPNESS,
            accept_threshold: defaults::DEFAULT_ACCEPT_THRESHOLD,
        }
    }
}
