use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only snapshot of the transaction being categorized. The core never
/// mutates the source record; category assignment is written back by the
/// caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSnapshot {
    /// Raw merchant text as it appears on the statement.
    pub merchant_text: String,
    /// Free-form description, possibly empty.
    pub description: String,
    /// Transaction amount, positive for spending.
    pub amount: f64,
    /// When the transaction occurred.
    pub transaction_time: DateTime<Utc>,
}

impl ExpenseSnapshot {
    pub fn new(merchant_text: &str, description: &str, amount: f64, at: DateTime<Utc>) -> Self {
        Self {
            merchant_text: merchant_text.to_string(),
            description: description.to_string(),
            amount,
            transaction_time: at,
        }
    }

    /// The text the matcher compares against textual patterns: merchant
    /// first, falling back to the description when the merchant is blank.
    pub fn primary_text(&self) -> &str {
        if self.merchant_text.trim().is_empty() {
            &self.description
        } else {
            &self.merchant_text
        }
    }
}
