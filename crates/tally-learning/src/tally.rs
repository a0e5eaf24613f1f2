//! Pre-creation recurrence counting.
//!
//! A pattern is only materialized after the same (merchant, category)
//! correction has been seen enough times. The counts live in-process:
//! they are reconstructible noise, not durable state, and losing them on
//! restart merely delays a creation by a few corrections.

use dashmap::DashMap;

use tally_core::pattern::{identity_hash, PatternType};

#[derive(Default)]
pub struct CorrectionTally {
    counts: DashMap<String, u32>,
}

impl CorrectionTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one recurrence, returning the total seen so far.
    pub fn record(&self, merchant: &str, category_id: &str) -> u32 {
        let key = identity_hash(PatternType::Merchant, merchant, category_id);
        let mut count = self.counts.entry(key).or_insert(0);
        *count += 1;
        *count
    }

    /// Drop the count once a pattern has been created for it.
    pub fn forget(&self, merchant: &str, category_id: &str) {
        let key = identity_hash(PatternType::Merchant, merchant, category_id);
        self.counts.remove(&key);
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
