//! Trigram Jaccard similarity.

use std::collections::HashSet;

/// Character trigrams of a string. Strings shorter than 3 characters
/// contribute themselves as a single gram so near-identical short strings
/// still overlap.
fn trigrams(s: &str) -> HashSet<String> {
    let chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return HashSet::new();
    }
    if chars.len() < 3 {
        let mut set = HashSet::new();
        set.insert(s.to_string());
        return set;
    }
    chars.windows(3).map(|w| w.iter().collect()).collect()
}

/// Jaccard similarity over trigram sets: |A ∩ B| / |A ∪ B|.
/// Empty input scores 0.0. Symmetric by construction.
pub fn trigram_jaccard(a: &str, b: &str) -> f64 {
    let ta = trigrams(a);
    let tb = trigrams(b);
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }
    let intersection = ta.intersection(&tb).count();
    let union = ta.union(&tb).count();
    intersection as f64 / union as f64
}
