//! Fixed time blocks.
//!
//! A block is an already-committed allocation of hours to one task — a
//! calendar appointment the engine must schedule around, not an output of
//! optimization. Blocks are either a single occurrence or repeat under a
//! [`Recurrence`] rule until an end date. Immutable.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{Recurrence, TaskId};

/// Repeat pattern for a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repeat {
    /// Last date (inclusive) on which the block may occur.
    pub until: NaiveDate,
    /// Which dates between start and `until` are occurrences.
    pub rule: Recurrence,
}

/// A fixed, already-committed allocation of hours to one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// The task this time is committed to.
    pub task: TaskId,
    /// Start of the (first) occurrence.
    pub start: NaiveDateTime,
    /// End of the (first) occurrence. Hours = duration start→end.
    pub end: NaiveDateTime,
    /// Repeat pattern. `None` = single occurrence on `start`'s date.
    pub repeat: Option<Repeat>,
}

impl Block {
    /// Creates a one-off block.
    pub fn once(task: TaskId, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            task,
            start,
            end,
            repeat: None,
        }
    }

    /// Creates a repeating block, occurring per `rule` through `until`.
    pub fn repeating(
        task: TaskId,
        start: NaiveDateTime,
        end: NaiveDateTime,
        until: NaiveDate,
        rule: Recurrence,
    ) -> Self {
        Self {
            task,
            start,
            end,
            repeat: Some(Repeat { until, rule }),
        }
    }

    /// Committed hours per occurrence.
    pub fn hours(&self) -> f64 {
        (self.end - self.start).num_minutes() as f64 / 60.0
    }

    /// Whether this block occupies the given calendar date.
    ///
    /// One-off blocks match exactly their start date. Repeating blocks match
    /// any date on/after the start date, on/before the repeat end date, that
    /// satisfies the rule.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        match &self.repeat {
            None => self.start.date() == date,
            Some(r) => date >= self.start.date() && date <= r.until && r.rule.matches(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_hours_from_duration() {
        let b = Block::once(TaskId(0), dt(2026, 8, 24, 9), dt(2026, 8, 24, 11));
        assert!((b.hours() - 2.0).abs() < 1e-12);

        let half = Block::once(
            TaskId(0),
            dt(2026, 8, 24, 9),
            NaiveDate::from_ymd_opt(2026, 8, 24)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        );
        assert!((half.hours() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_one_off_occurs_only_on_start_date() {
        let b = Block::once(TaskId(0), dt(2026, 8, 24, 9), dt(2026, 8, 24, 11));
        assert!(b.occurs_on(d(2026, 8, 24)));
        assert!(!b.occurs_on(d(2026, 8, 23)));
        assert!(!b.occurs_on(d(2026, 8, 25)));
    }

    #[test]
    fn test_weekly_repeat_within_range() {
        // Every Monday, 2026-08-24 (a Monday) through 2026-09-14.
        let b = Block::repeating(
            TaskId(0),
            dt(2026, 8, 24, 9),
            dt(2026, 8, 24, 10),
            d(2026, 9, 14),
            Recurrence::Weekdays(vec![Weekday::Mon]),
        );
        assert!(b.occurs_on(d(2026, 8, 24)));
        assert!(b.occurs_on(d(2026, 8, 31)));
        assert!(b.occurs_on(d(2026, 9, 14))); // inclusive end
        assert!(!b.occurs_on(d(2026, 8, 25))); // Tuesday
        assert!(!b.occurs_on(d(2026, 9, 21))); // past repeat end
        assert!(!b.occurs_on(d(2026, 8, 17))); // before start
    }
}
