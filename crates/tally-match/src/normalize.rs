//! Text normalization: case-fold, strip accents and punctuation, collapse
//! whitespace, drop long numeric tokens. Pure function, no state.

/// Normalize a raw merchant/description string for comparison.
///
/// Steps, in order: lowercase, fold common accented characters to ASCII,
/// replace non-alphanumerics with spaces (preserving word boundaries),
/// drop numeric tokens of length >= 4 (transaction IDs, store numbers),
/// collapse repeated whitespace.
pub fn normalize(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars() {
        for lower in c.to_lowercase() {
            match fold_accent(lower) {
                Some(ascii) => folded.push(ascii),
                None if lower.is_alphanumeric() => folded.push(lower),
                None => folded.push(' '),
            }
        }
    }

    folded
        .split_whitespace()
        .filter(|token| !is_noise_number(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map common accented Latin characters to their ASCII base. Returns None
/// for characters that need no folding.
fn fold_accent(c: char) -> Option<char> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'ñ' => 'n',
        'ç' => 'c',
        'ß' => 's',
        _ => return None,
    };
    Some(folded)
}

/// Numeric tokens of length >= 4 are transaction IDs, not signal.
fn is_noise_number(token: &str) -> bool {
    token.len() >= 4 && token.chars().all(|c| c.is_ascii_digit())
}
