use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of signal a pattern matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// Normalized merchant name, e.g. "starbucks".
    Merchant,
    /// A single keyword found anywhere in the text.
    Keyword,
    /// Free-form description text.
    Description,
    /// An inclusive amount range, stored as "min-max".
    AmountRange,
    /// A named bucket or "HH:MM-HH:MM" window.
    Time,
    /// A bounded regular expression.
    Regex,
}

impl PatternType {
    /// Whether this pattern type is compared textually by the fuzzy matcher.
    pub fn is_textual(self) -> bool {
        matches!(
            self,
            PatternType::Merchant | PatternType::Keyword | PatternType::Description
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PatternType::Merchant => "merchant",
            PatternType::Keyword => "keyword",
            PatternType::Description => "description",
            PatternType::AmountRange => "amount_range",
            PatternType::Time => "time",
            PatternType::Regex => "regex",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "merchant" => Ok(PatternType::Merchant),
            "keyword" => Ok(PatternType::Keyword),
            "description" => Ok(PatternType::Description),
            "amount_range" => Ok(PatternType::AmountRange),
            "time" => Ok(PatternType::Time),
            "regex" => Ok(PatternType::Regex),
            other => Err(format!("unknown pattern type: {other}")),
        }
    }
}
