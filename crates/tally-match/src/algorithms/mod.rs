//! Similarity algorithms. All are symmetric and return scores in [0.0, 1.0].

mod jaro_winkler;
mod levenshtein;
mod trigram;

pub use jaro_winkler::{jaro, jaro_winkler};
pub use levenshtein::{levenshtein, levenshtein_ratio, windowed_ratio};
pub use trigram::trigram_jaccard;
