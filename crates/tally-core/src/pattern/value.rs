//! Structured pattern values: amount ranges and time patterns.
//!
//! Both are stored as strings in `pattern_value` and parsed on demand;
//! boundary validation guarantees stored values parse.

use chrono::{DateTime, Datelike, NaiveTime, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// An inclusive amount range, serialized as "min-max".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: f64,
    pub max: f64,
}

impl AmountRange {
    /// Parse "min-max". Returns None for malformed input or min >= max.
    pub fn parse(value: &str) -> Option<Self> {
        let (min_s, max_s) = value.split_once('-')?;
        let min: f64 = min_s.trim().parse().ok()?;
        let max: f64 = max_s.trim().parse().ok()?;
        if !min.is_finite() || !max.is_finite() || min >= max || min < 0.0 {
            return None;
        }
        Some(Self { min, max })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, amount: f64) -> bool {
        amount >= self.min && amount <= self.max
    }

    /// 1.0 inside the range, falling off linearly to 0.0 at one span's
    /// distance outside it.
    pub fn proximity(&self, amount: f64) -> f64 {
        if self.contains(amount) {
            return 1.0;
        }
        let distance = if amount < self.min {
            self.min - amount
        } else {
            amount - self.max
        };
        let span = self.span().max(f64::EPSILON);
        (1.0 - distance / span).max(0.0)
    }
}

/// Named time-of-day/week buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBucket {
    Morning,
    Afternoon,
    Evening,
    Night,
    Weekend,
    Weekday,
}

impl TimeBucket {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "morning" => Some(TimeBucket::Morning),
            "afternoon" => Some(TimeBucket::Afternoon),
            "evening" => Some(TimeBucket::Evening),
            "night" => Some(TimeBucket::Night),
            "weekend" => Some(TimeBucket::Weekend),
            "weekday" => Some(TimeBucket::Weekday),
            _ => None,
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let hour = at.hour();
        match self {
            TimeBucket::Morning => (5..12).contains(&hour),
            TimeBucket::Afternoon => (12..17).contains(&hour),
            TimeBucket::Evening => (17..22).contains(&hour),
            TimeBucket::Night => !(5..22).contains(&hour),
            TimeBucket::Weekend => {
                matches!(at.weekday(), Weekday::Sat | Weekday::Sun)
            }
            TimeBucket::Weekday => {
                !matches!(at.weekday(), Weekday::Sat | Weekday::Sun)
            }
        }
    }
}

/// A time pattern: either a named bucket or an explicit HH:MM-HH:MM window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimePattern {
    Bucket(TimeBucket),
    Window { start: NaiveTime, end: NaiveTime },
}

impl TimePattern {
    /// Parse a named bucket or "HH:MM-HH:MM".
    pub fn parse(value: &str) -> Option<Self> {
        if let Some(bucket) = TimeBucket::parse(value) {
            return Some(TimePattern::Bucket(bucket));
        }
        let (start_s, end_s) = value.split_once('-')?;
        let start = NaiveTime::parse_from_str(start_s.trim(), "%H:%M").ok()?;
        let end = NaiveTime::parse_from_str(end_s.trim(), "%H:%M").ok()?;
        Some(TimePattern::Window { start, end })
    }

    /// Whether the timestamp falls inside the pattern. Windows that wrap
    /// midnight (start > end) are honored.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        match self {
            TimePattern::Bucket(bucket) => bucket.contains(at),
            TimePattern::Window { start, end } => {
                let t = at.time();
                if start <= end {
                    t >= *start && t <= *end
                } else {
                    t >= *start || t <= *end
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_amount_range() {
        let range = AmountRange::parse("10.50-99.99").unwrap();
        assert_eq!(range.min, 10.50);
        assert_eq!(range.max, 99.99);
        assert!(range.contains(50.0));
        assert!(!range.contains(100.0));
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(AmountRange::parse("100-10").is_none());
        assert!(AmountRange::parse("abc-10").is_none());
    }

    #[test]
    fn proximity_decays_outside_range() {
        let range = AmountRange::parse("10-20").unwrap();
        assert_eq!(range.proximity(15.0), 1.0);
        assert!(range.proximity(25.0) < 1.0);
        assert_eq!(range.proximity(1000.0), 0.0);
    }

    #[test]
    fn parses_named_buckets_and_windows() {
        assert!(matches!(
            TimePattern::parse("morning"),
            Some(TimePattern::Bucket(TimeBucket::Morning))
        ));
        assert!(matches!(
            TimePattern::parse("09:00-17:30"),
            Some(TimePattern::Window { .. })
        ));
        assert!(TimePattern::parse("someday").is_none());
    }

    #[test]
    fn window_wrapping_midnight() {
        let pattern = TimePattern::parse("22:00-02:00").unwrap();
        let late = Utc.with_ymd_and_hms(2025, 6, 2, 23, 30, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2025, 6, 2, 1, 0, 0).unwrap();
        let noon = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();
        assert!(pattern.contains(late));
        assert!(pattern.contains(early));
        assert!(!pattern.contains(noon));
    }
}
