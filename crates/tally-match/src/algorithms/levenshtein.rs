//! Levenshtein edit distance and its normalized ratio.
//!
//! Used by the learner's merge check, not by the hot matching path.

/// Edit distance with the classic two-row dynamic program.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Normalized similarity: 1 - distance / max_len. Two empty strings are
/// identical (1.0).
pub fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// Best `levenshtein_ratio` between `candidate` and the whole of `query` or
/// any candidate-sized token window of it. Statement lines carry store
/// numbers and location tails ("starbucks seattle wa") that a short stored
/// value ("starbucks") should not be penalized for.
pub fn windowed_ratio(query: &str, candidate: &str) -> f64 {
    let mut best = levenshtein_ratio(query, candidate);
    let width = candidate.split_whitespace().count();
    if width == 0 {
        return best;
    }
    let tokens: Vec<&str> = query.split_whitespace().collect();
    if tokens.len() <= width {
        return best;
    }
    for window in tokens.windows(width) {
        let ratio = levenshtein_ratio(&window.join(" "), candidate);
        if ratio > best {
            best = ratio;
        }
    }
    best
}
