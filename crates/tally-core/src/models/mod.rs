//! Ephemeral value objects exchanged between subsystems.

mod breakdown;
mod categorization;
mod correction;
mod expense;
mod learn_report;
mod match_result;

pub use breakdown::{ConfidenceBreakdown, FactorContribution};
pub use categorization::CategorizationResult;
pub use correction::CorrectionEvent;
pub use expense::ExpenseSnapshot;
pub use learn_report::{BatchLearnReport, LearnOutcome};
pub use match_result::{MatchAlgorithm, MatchResult, MatchType};
