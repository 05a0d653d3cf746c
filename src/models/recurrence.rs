//! Calendar recurrence rules.
//!
//! A recurrence rule decides whether a calendar date is an occurrence day.
//! Rules are a closed enum — serializable, comparable, and testable in
//! isolation — rather than opaque predicates.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// A date-matching recurrence rule.
///
/// Matching is a pure predicate with no side effects. Range limits
/// (block start, end-of-repeat) are applied by [`Block`](super::Block),
/// not by the rule itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Recurrence {
    /// Occurs on the listed weekdays (e.g. every Monday and Thursday).
    Weekdays(Vec<Weekday>),
    /// Occurs on the listed days of the month (1-31).
    MonthDates(Vec<u32>),
    /// Occurs every `every_days` days counted from `anchor`.
    ///
    /// A date matches iff it is on/after the anchor and the day distance is
    /// an exact multiple of the interval. An interval of zero never matches
    /// (and is rejected by validation).
    Interval {
        anchor: NaiveDate,
        every_days: u32,
    },
}

impl Recurrence {
    /// Whether `date` is an occurrence day under this rule.
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            Recurrence::Weekdays(days) => days.contains(&date.weekday()),
            Recurrence::MonthDates(dates) => dates.contains(&date.day()),
            Recurrence::Interval { anchor, every_days } => {
                if *every_days == 0 || date < *anchor {
                    return false;
                }
                (date - *anchor).num_days() % i64::from(*every_days) == 0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_weekdays() {
        let rule = Recurrence::Weekdays(vec![Weekday::Mon, Weekday::Thu]);
        assert!(rule.matches(d(2026, 8, 24))); // Monday
        assert!(rule.matches(d(2026, 8, 27))); // Thursday
        assert!(!rule.matches(d(2026, 8, 25))); // Tuesday
    }

    #[test]
    fn test_month_dates() {
        let rule = Recurrence::MonthDates(vec![1, 15]);
        assert!(rule.matches(d(2026, 8, 1)));
        assert!(rule.matches(d(2026, 9, 15)));
        assert!(!rule.matches(d(2026, 8, 14)));
    }

    #[test]
    fn test_interval_matches_exact_multiples() {
        let rule = Recurrence::Interval {
            anchor: d(2026, 8, 1),
            every_days: 6,
        };
        assert!(rule.matches(d(2026, 8, 1))); // anchor itself
        assert!(rule.matches(d(2026, 8, 7)));
        assert!(rule.matches(d(2026, 8, 13)));
        assert!(!rule.matches(d(2026, 8, 8)));
        assert!(!rule.matches(d(2026, 8, 12)));
    }

    #[test]
    fn test_interval_before_anchor_never_matches() {
        let rule = Recurrence::Interval {
            anchor: d(2026, 8, 10),
            every_days: 2,
        };
        assert!(!rule.matches(d(2026, 8, 8)));
        assert!(rule.matches(d(2026, 8, 10)));
    }

    #[test]
    fn test_interval_zero_never_matches() {
        let rule = Recurrence::Interval {
            anchor: d(2026, 8, 1),
            every_days: 0,
        };
        assert!(!rule.matches(d(2026, 8, 1)));
        assert!(!rule.matches(d(2026, 8, 2)));
    }

    #[test]
    fn test_serde_round_trip() {
        let rule = Recurrence::Weekdays(vec![Weekday::Mon]);
        let json = serde_json::to_string(&rule).unwrap();
        let back: Recurrence = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }
}
