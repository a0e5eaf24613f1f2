/// Boundary validation failures. Rejected synchronously, never persisted.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("pattern text must be 2-255 characters, got {length}")]
    TextLength { length: usize },

    #[error("pattern text contains control characters")]
    ControlCharacters,

    #[error("pattern text {value:?} is a low-information common word")]
    LowInformation { value: String },

    #[error("amount range {value:?} is malformed, expected min-max with min < max")]
    MalformedAmountRange { value: String },

    #[error("amount range span {span} exceeds the maximum of {max}")]
    AmountSpanTooWide { span: f64, max: f64 },

    #[error("time pattern {value:?} is not a named bucket or HH:MM-HH:MM window")]
    MalformedTimePattern { value: String },

    #[error("regex pattern exceeds {max} characters, got {length}")]
    RegexTooLong { length: usize, max: usize },

    #[error("regex pattern rejected: nested unbounded quantifier near {fragment:?}")]
    RegexCatastrophic { fragment: String },

    #[error("regex pattern does not compile: {reason}")]
    RegexInvalid { reason: String },
}
