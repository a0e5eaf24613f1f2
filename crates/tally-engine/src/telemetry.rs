//! Span definitions per operation, and a tracing bootstrap.
//!
//! Each operation gets one span carrying its key dimensions; everything
//! else hangs off it as events from the crates doing the work.

use tracing_subscriber::EnvFilter;

/// Span for one categorize call.
#[macro_export]
macro_rules! categorize_span {
    ($merchant:expr, $scope:expr) => {
        tracing::info_span!("tally.categorize", merchant = %$merchant, scope = %$scope)
    };
}

/// Span for one learn call.
#[macro_export]
macro_rules! learn_span {
    ($category:expr) => {
        tracing::info_span!("tally.learn", category = %$category)
    };
}

/// Span for one batch learn.
#[macro_export]
macro_rules! learn_batch_span {
    ($batch_size:expr) => {
        tracing::info_span!("tally.learn_batch", batch_size = $batch_size)
    };
}

/// Span for one maintenance pass.
#[macro_export]
macro_rules! maintenance_span {
    () => {
        tracing::info_span!("tally.maintenance")
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const CATEGORIZE: &str = "tally.categorize";
    pub const LEARN: &str = "tally.learn";
    pub const LEARN_BATCH: &str = "tally.learn_batch";
    pub const MAINTENANCE: &str = "tally.maintenance";
}

/// Install a global subscriber honoring `RUST_LOG`, defaulting to `info`
/// for the tally crates. Safe to call more than once; later calls lose.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tally_cache=info,tally_learning=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
