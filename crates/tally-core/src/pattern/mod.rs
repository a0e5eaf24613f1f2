//! The Pattern entity and its satellite types.

mod base;
mod metadata;
mod pattern_type;
mod stage;
mod value;
mod weight;

pub use base::{identity_hash, Pattern};
pub use metadata::{PatternMetadata, TemporalSignature};
pub use pattern_type::PatternType;
pub use stage::PatternStage;
pub use value::{AmountRange, TimeBucket, TimePattern};
pub use weight::Weight;
