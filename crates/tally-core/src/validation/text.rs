use crate::errors::ValidationError;

/// Single common words that carry no categorization signal on their own.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "from", "this", "that", "payment", "purchase", "debit", "credit",
    "card", "online", "store", "shop", "inc", "llc", "ltd", "co",
];

/// Merchant/keyword/description text: 2-255 chars, no control characters,
/// not a lone low-information word.
pub fn validate_text(value: &str) -> Result<(), ValidationError> {
    let length = value.chars().count();
    if !(2..=255).contains(&length) {
        return Err(ValidationError::TextLength { length });
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(ValidationError::ControlCharacters);
    }
    let lowered = value.trim().to_lowercase();
    if !lowered.contains(char::is_whitespace) && STOPWORDS.contains(&lowered.as_str()) {
        return Err(ValidationError::LowInformation {
            value: value.to_string(),
        });
    }
    Ok(())
}
