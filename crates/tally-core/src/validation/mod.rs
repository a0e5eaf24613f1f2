//! Boundary validation for pattern values. Malformed or unsafe input is
//! rejected synchronously and never persisted.

mod regex_guard;
mod text;

pub use regex_guard::validate_regex;
pub use text::validate_text;

use crate::constants::MAX_AMOUNT_SPAN;
use crate::errors::ValidationError;
use crate::pattern::{AmountRange, PatternType, TimePattern};

/// Validate a pattern value against the contract for its type.
pub fn validate_pattern_value(
    pattern_type: PatternType,
    value: &str,
) -> Result<(), ValidationError> {
    match pattern_type {
        PatternType::Merchant | PatternType::Keyword | PatternType::Description => {
            validate_text(value)
        }
        PatternType::AmountRange => validate_amount_range(value),
        PatternType::Time => validate_time_pattern(value),
        PatternType::Regex => validate_regex(value),
    }
}

/// "min-max" with min < max and a bounded span.
pub fn validate_amount_range(value: &str) -> Result<(), ValidationError> {
    let range = AmountRange::parse(value).ok_or_else(|| ValidationError::MalformedAmountRange {
        value: value.to_string(),
    })?;
    if range.span() > MAX_AMOUNT_SPAN {
        return Err(ValidationError::AmountSpanTooWide {
            span: range.span(),
            max: MAX_AMOUNT_SPAN,
        });
    }
    Ok(())
}

/// A named bucket or a valid HH:MM-HH:MM window.
pub fn validate_time_pattern(value: &str) -> Result<(), ValidationError> {
    TimePattern::parse(value)
        .map(|_| ())
        .ok_or_else(|| ValidationError::MalformedTimePattern {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_by_type() {
        assert!(validate_pattern_value(PatternType::Merchant, "starbucks").is_ok());
        assert!(validate_pattern_value(PatternType::Merchant, "a").is_err());
        assert!(validate_pattern_value(PatternType::AmountRange, "10-20").is_ok());
        assert!(validate_pattern_value(PatternType::Time, "weekend").is_ok());
        assert!(validate_pattern_value(PatternType::Regex, "^uber").is_ok());
    }

    #[test]
    fn amount_span_is_bounded() {
        assert!(validate_amount_range("0-10000").is_ok());
        assert!(matches!(
            validate_amount_range("0-20000"),
            Err(ValidationError::AmountSpanTooWide { .. })
        ));
    }

    #[test]
    fn time_patterns() {
        assert!(validate_time_pattern("morning").is_ok());
        assert!(validate_time_pattern("09:00-17:00").is_ok());
        assert!(validate_time_pattern("25:00-17:00").is_err());
        assert!(validate_time_pattern("eventually").is_err());
    }
}
