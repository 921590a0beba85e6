//! Working-day arithmetic over sprint ranges
//!
//! A working day is a Monday-to-Friday date that no [`DayOff`] covers.
//! Days are binary: any overlap with an exclusion removes the whole day.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// An inclusive period during which a developer is unavailable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayOff {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DayOff {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A day off covering exactly one date
    pub fn single(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    /// Returns true if `day` falls within `[start, end]`
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// Returns true for Saturdays and Sundays
pub fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts weekdays in `[start, end]` not covered by any exclusion.
///
/// Returns 0 when `start > end`.
pub fn working_days(start: NaiveDate, end: NaiveDate, exclusions: &[DayOff]) -> u32 {
    if start > end {
        return 0;
    }

    let count = start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !is_weekend(*day))
        .filter(|day| !exclusions.iter().any(|off| off.contains(*day)))
        .count();

    count as u32
}

/// Calendar dates a sprint spans, either of which may be unknown upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SprintRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl SprintRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// A range with both endpoints known
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// Returns true if both endpoints are known
    pub fn is_bounded(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Working days in the range; 0 when an endpoint is missing
    pub fn working_days(&self, exclusions: &[DayOff]) -> u32 {
        match (self.start, self.end) {
            (Some(start), Some(end)) => working_days(start, end, exclusions),
            _ => 0,
        }
    }
}
