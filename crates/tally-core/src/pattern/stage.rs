//! Pattern lifecycle stages.
//!
//! A stage is derived from usage statistics, never stored: testing →
//! probation → active → mature, with declining and retired as exits.

use serde::{Deserialize, Serialize};

/// Lifecycle stage of a pattern, derived from its counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternStage {
    /// Too little data to judge (usage_count < 10).
    Testing,
    /// Some data, mediocre results (usage_count < 50, success_rate < 0.7).
    Probation,
    /// Performing adequately.
    Active,
    /// Long track record, high success (usage_count > 100, rate > 0.8).
    Mature,
    /// Substantial usage but failing (rate < 0.5, usage_count > 50).
    Declining,
    /// Terminal: deactivated.
    Retired,
}

impl PatternStage {
    /// Classify a pattern's stage from its counters and active flag.
    pub fn classify(usage_count: u64, success_rate: f64, active: bool) -> Self {
        if !active {
            return PatternStage::Retired;
        }
        if usage_count < 10 {
            return PatternStage::Testing;
        }
        if usage_count > 50 && success_rate < 0.5 {
            return PatternStage::Declining;
        }
        if usage_count < 50 && success_rate < 0.7 {
            return PatternStage::Probation;
        }
        if usage_count > 100 && success_rate > 0.8 {
            return PatternStage::Mature;
        }
        PatternStage::Active
    }
}
