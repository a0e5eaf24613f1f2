//! Static regex safety checks.
//!
//! Regex patterns are capped at 100 characters and scanned for
//! catastrophic-backtracking shapes (an unbounded quantifier applied to a
//! group that itself contains an unbounded quantifier, e.g. `(a+)+`) before
//! they are ever compiled or persisted.

use crate::constants::MAX_REGEX_LENGTH;
use crate::errors::ValidationError;

/// Compiled regex size limit — rejects pathological expansions like huge
/// bounded repetitions that slip past the length cap.
const REGEX_SIZE_LIMIT: usize = 1 << 16;

/// Validate a regex pattern value: length cap, denylist, compilability.
pub fn validate_regex(value: &str) -> Result<(), ValidationError> {
    let length = value.chars().count();
    if length > MAX_REGEX_LENGTH {
        return Err(ValidationError::RegexTooLong {
            length,
            max: MAX_REGEX_LENGTH,
        });
    }
    if let Some(fragment) = find_nested_quantifier(value) {
        return Err(ValidationError::RegexCatastrophic { fragment });
    }
    regex::RegexBuilder::new(value)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map(|_| ())
        .map_err(|e| ValidationError::RegexInvalid {
            reason: e.to_string(),
        })
}

/// Scan for a group containing an unbounded quantifier that is itself
/// followed by an unbounded quantifier. Returns the offending fragment.
///
/// This is a conservative syntactic check, not a full parser: escaped
/// characters are skipped, character classes are treated as opaque.
fn find_nested_quantifier(pattern: &str) -> Option<String> {
    let chars: Vec<char> = pattern.chars().collect();
    // Stack of (group start index, group contains an unbounded quantifier).
    let mut stack: Vec<(usize, bool)> = Vec::new();
    let mut in_class = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' => {
                i += 1; // Skip the escaped character.
            }
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            _ if in_class => {}
            '(' => stack.push((i, false)),
            ')' => {
                if let Some((start, had_quantifier)) = stack.pop() {
                    let quantified = next_is_unbounded_quantifier(&chars, i + 1);
                    if had_quantifier && quantified {
                        let end = (i + 2).min(chars.len());
                        return Some(chars[start..end].iter().collect());
                    }
                    // A quantified group counts as an unbounded quantifier
                    // for its parent.
                    if let Some(parent) = stack.last_mut() {
                        parent.1 |= had_quantifier || quantified;
                    }
                }
            }
            '*' | '+' => {
                if let Some(parent) = stack.last_mut() {
                    parent.1 = true;
                }
            }
            '{' => {
                // {n,} with no upper bound is unbounded.
                if let Some(close) = chars[i..].iter().position(|&c| c == '}') {
                    let body: String = chars[i + 1..i + close].iter().collect();
                    if body.ends_with(',') {
                        if let Some(parent) = stack.last_mut() {
                            parent.1 = true;
                        }
                    }
                    i += close;
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Whether position `at` starts an unbounded quantifier (`*`, `+`, `{n,}`).
fn next_is_unbounded_quantifier(chars: &[char], at: usize) -> bool {
    match chars.get(at) {
        Some('*') | Some('+') => true,
        Some('{') => {
            let rest: String = chars[at..].iter().collect();
            rest.find('}')
                .map(|close| rest[1..close].ends_with(','))
                .unwrap_or(false)
        }
        _ => false,
    }
}
