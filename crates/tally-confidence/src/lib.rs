//! Confidence scoring for candidate pattern matches.
//!
//! A raw similarity score says how alike two strings are; confidence says
//! how much the pattern's track record, the transaction's amount and its
//! timing back that similarity up. Five factors contribute, each scored in
//! [0.0, 1.0], combined as a weighted mean over the factors that actually
//! have data, then squashed through a logistic curve so mid-range scores
//! separate cleanly from strong ones.

pub mod calculator;
pub mod factors;
pub mod formula;

pub use calculator::ConfidenceCalculator;
pub use formula::squash;
