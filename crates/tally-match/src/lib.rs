//! # tally-match
//!
//! Text normalization and fuzzy matching. Ranks candidate patterns by
//! similarity to a query string using an exact short-circuit, Jaro-Winkler,
//! and trigram Jaccard, combined through an explicit scoring pipeline.
//! All computation here is CPU-bound and non-blocking.

pub mod algorithms;
pub mod matcher;
pub mod normalize;
pub mod pipeline;

pub use matcher::{FuzzyMatcher, MatchOptions};
pub use normalize::normalize;
