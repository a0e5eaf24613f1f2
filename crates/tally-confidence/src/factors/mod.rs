//! One module per confidence factor.
//!
//! Every factor returns `Option<f64>` in [0.0, 1.0]. `None` means the
//! factor has no data for this pattern/expense pair and must be excluded
//! from both the numerator and the denominator of the weighted mean —
//! a pattern with no amount history is not punished for it.

pub mod amount;
pub mod frequency;
pub mod historical;
pub mod temporal;
pub mod text;

/// Stable factor names used as breakdown keys.
pub const TEXT: &str = "text_match";
pub const HISTORICAL: &str = "historical_accuracy";
pub const FREQUENCY: &str = "usage_frequency";
pub const AMOUNT: &str = "amount_similarity";
pub const TEMPORAL: &str = "temporal_fit";
