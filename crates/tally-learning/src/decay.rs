//! Weight decay for patterns that have stopped matching.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use tally_core::TallyResult;

use crate::learner::PatternLearner;

impl PatternLearner {
    /// Decay every active pattern that has not matched for the configured
    /// stale window. Each stale pattern loses exactly one decay factor per
    /// sweep; repeated sweeps compound. Returns the number decayed.
    pub fn decay_sweep(&self, now: DateTime<Utc>) -> TallyResult<usize> {
        let cutoff = now - Duration::days(self.config.decay_stale_days);
        let stale = self.store().list_stale(cutoff)?;
        let factor = self.config.decay_factor;

        let mut decayed = 0usize;
        for pattern in stale {
            self.update_with_retry(&pattern.id, |p| {
                p.confidence_weight = p.confidence_weight.decayed(factor);
                p.updated_at = now;
            })?;
            decayed += 1;
        }

        if decayed > 0 {
            self.cache().invalidate(None);
            info!(decayed, factor, "decay sweep complete");
        }
        Ok(decayed)
    }
}
