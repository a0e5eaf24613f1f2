//! # tally-core
//!
//! Foundation crate for the Tally categorization core.
//! Defines all types, traits, errors, config, constants, and boundary
//! validation. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod pattern;
pub mod traits;
pub mod validation;

// Re-export the most commonly used types at the crate root.
pub use config::TallyConfig;
pub use errors::{TallyError, TallyResult};
pub use models::{
    CategorizationResult, ConfidenceBreakdown, CorrectionEvent, ExpenseSnapshot, MatchResult,
};
pub use pattern::{Pattern, PatternStage, PatternType, Weight};
