use serde::{Deserialize, Serialize};

use super::breakdown::ConfidenceBreakdown;

/// Output of one categorize call. Immutable once constructed.
///
/// "No sufficiently confident match" is a value, not an error: category is
/// None, confidence 0.0, and the explanation says why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizationResult {
    /// Best category, or None when nothing cleared the accept threshold.
    pub category: Option<String>,
    /// Calibrated confidence in [0.0, 1.0].
    pub confidence: f64,
    /// IDs of the patterns that contributed, best first.
    pub patterns_used: Vec<String>,
    /// Per-factor explanation for the winning candidate.
    pub breakdown: Option<ConfidenceBreakdown>,
    /// Human-readable account of the decision.
    pub explanation: String,
    /// Set when a component degraded during the call (still a valid result).
    pub error: Option<String>,
}

impl CategorizationResult {
    /// A confident categorization.
    pub fn matched(
        category: String,
        confidence: f64,
        patterns_used: Vec<String>,
        breakdown: ConfidenceBreakdown,
        explanation: String,
    ) -> Self {
        Self {
            category: Some(category),
            confidence: confidence.clamp(0.0, 1.0),
            patterns_used,
            breakdown: Some(breakdown),
            explanation,
            error: None,
        }
    }

    /// The no-match result. Never an error.
    pub fn no_match(explanation: &str) -> Self {
        Self {
            category: None,
            confidence: 0.0,
            patterns_used: Vec::new(),
            breakdown: None,
            explanation: explanation.to_string(),
            error: None,
        }
    }

    /// Attach a degradation note without invalidating the result.
    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn is_match(&self) -> bool {
        self.category.is_some()
    }
}
