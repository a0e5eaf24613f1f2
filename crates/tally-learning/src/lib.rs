//! Learning from user corrections.
//!
//! Every confirmed or corrected categorization flows through the
//! `PatternLearner`: mispredicting patterns record a failure, the right
//! category's pattern records a success (or is created once the same
//! correction has recurred often enough), near-duplicate siblings merge,
//! and chronically wrong patterns retire. A periodic decay sweep erodes
//! the weight of patterns that have stopped matching anything.

pub mod batch;
pub mod decay;
pub mod learner;
pub mod tally;

pub use learner::PatternLearner;
pub use tally::CorrectionTally;
