use crate::models::ExpenseSnapshot;
use crate::pattern::Pattern;

/// Extraction policy: which field of a value the fuzzy matcher compares.
/// One implementation per known source type, resolved at the call site,
/// so type branching never accumulates inside the matcher.
pub trait MatchSource {
    fn match_text(&self) -> &str;
}

impl MatchSource for str {
    fn match_text(&self) -> &str {
        self
    }
}

impl MatchSource for String {
    fn match_text(&self) -> &str {
        self
    }
}

impl MatchSource for Pattern {
    fn match_text(&self) -> &str {
        &self.pattern_value
    }
}

impl MatchSource for ExpenseSnapshot {
    fn match_text(&self) -> &str {
        self.primary_text()
    }
}
