use serde::{Deserialize, Serialize};

use crate::constants;

/// Learner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Recurrences of the same correction before a pattern is created.
    pub creation_threshold: u32,
    /// Textual similarity at which sibling patterns merge.
    pub merge_threshold: f64,
    /// Days without a match before a pattern's weight decays.
    pub decay_stale_days: i64,
    /// Weight multiplier per decay sweep.
    pub decay_factor: f64,
    /// Max corrections per batch.
    pub max_batch_size: usize,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            creation_threshold: constants::CREATION_RECURRENCE_THRESHOLD,
            merge_threshold: constants::MERGE_SIMILARITY_THRESHOLD,
            decay_stale_days: constants::DECAY_STALE_DAYS,
            decay_factor: constants::DECAY_FACTOR,
            max_batch_size: constants::MAX_BATCH_SIZE,
        }
    }
}
