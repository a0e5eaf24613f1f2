//! Jaro and Jaro-Winkler similarity.

/// Winkler prefix scaling factor.
const PREFIX_SCALE: f64 = 0.1;

/// Maximum shared prefix length that earns the Winkler boost.
const MAX_PREFIX: usize = 4;

/// Strings shorter than this skip the prefix bonus entirely.
const MIN_LEN_FOR_PREFIX_BONUS: usize = 4;

/// Jaro similarity. Empty input scores 0.0.
pub fn jaro(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let match_window = (a.len().max(b.len()) / 2).saturating_sub(1);
    let mut a_matched = vec![false; a.len()];
    let mut b_matched = vec![false; b.len()];
    let mut matches = 0usize;

    for (i, ca) in a.iter().enumerate() {
        let lo = i.saturating_sub(match_window);
        let hi = (i + match_window + 1).min(b.len());
        for j in lo..hi {
            if !b_matched[j] && b[j] == *ca {
                a_matched[i] = true;
                b_matched[j] = true;
                matches += 1;
                break;
            }
        }
    }

    if matches == 0 {
        return 0.0;
    }

    // Count transpositions among matched characters.
    let mut transpositions = 0usize;
    let mut j = 0usize;
    for (i, matched) in a_matched.iter().enumerate() {
        if !matched {
            continue;
        }
        while !b_matched[j] {
            j += 1;
        }
        if a[i] != b[j] {
            transpositions += 1;
        }
        j += 1;
    }

    let m = matches as f64;
    let t = (transpositions / 2) as f64;
    (m / a.len() as f64 + m / b.len() as f64 + (m - t) / m) / 3.0
}

/// Jaro-Winkler: Jaro boosted by a shared-prefix bonus of up to 4
/// characters. Strings under 4 characters skip the bonus.
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    let base = jaro(a, b);
    if a.chars().count() < MIN_LEN_FOR_PREFIX_BONUS || b.chars().count() < MIN_LEN_FOR_PREFIX_BONUS
    {
        return base;
    }
    let prefix = a
        .chars()
        .zip(b.chars())
        .take(MAX_PREFIX)
        .take_while(|(x, y)| x == y)
        .count();
    (base + prefix as f64 * PREFIX_SCALE * (1.0 - base)).clamp(0.0, 1.0)
}
