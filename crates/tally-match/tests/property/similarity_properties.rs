use proptest::prelude::*;
use tally_match::algorithms::{jaro_winkler, levenshtein_ratio, trigram_jaccard};
use tally_match::normalize;

proptest! {
    #[test]
    fn jaro_winkler_is_symmetric(a in "\\PC{0,30}", b in "\\PC{0,30}") {
        prop_assert_eq!(jaro_winkler(&a, &b), jaro_winkler(&b, &a));
    }

    #[test]
    fn jaro_winkler_is_bounded(a in "\\PC{0,30}", b in "\\PC{0,30}") {
        let sim = jaro_winkler(&a, &b);
        prop_assert!((0.0..=1.0).contains(&sim));
    }

    #[test]
    fn trigram_is_symmetric(a in "\\PC{0,30}", b in "\\PC{0,30}") {
        prop_assert_eq!(trigram_jaccard(&a, &b), trigram_jaccard(&b, &a));
    }

    #[test]
    fn trigram_is_bounded(a in "\\PC{0,30}", b in "\\PC{0,30}") {
        let sim = trigram_jaccard(&a, &b);
        prop_assert!((0.0..=1.0).contains(&sim));
    }

    #[test]
    fn identical_strings_always_score_one(a in "\\PC{1,30}") {
        prop_assert_eq!(jaro_winkler(&a, &a), 1.0);
        prop_assert_eq!(trigram_jaccard(&a, &a), 1.0);
        prop_assert_eq!(levenshtein_ratio(&a, &a), 1.0);
    }

    #[test]
    fn normalization_is_idempotent(a in "\\PC{0,60}") {
        let once = normalize(&a);
        let twice = normalize(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn levenshtein_ratio_is_bounded(a in "\\PC{0,30}", b in "\\PC{0,30}") {
        let sim = levenshtein_ratio(&a, &b);
        prop_assert!((0.0..=1.0).contains(&sim));
    }
}
