//! Half-open `[start, end)` intervals over facility-local wall time.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Rejection, Result};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// A non-empty half-open time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    /// Build an interval, rejecting `end <= start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end <= start {
            return Err(Rejection::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Build an interval from minute offsets relative to midnight of `date`.
    ///
    /// Offsets may be negative or exceed a day, which is how ranges spilling
    /// across midnight are expressed.
    ///
    /// # Errors
    /// Returns `Rejection::InvalidRange` when `end <= start` or an endpoint
    /// falls outside the representable calendar.
    pub fn on_day(date: NaiveDate, start_minute: i64, end_minute: i64) -> Result<Self> {
        Self::new(
            offset_from_midnight(date, start_minute)?,
            offset_from_midnight(date, end_minute)?,
        )
    }

    /// The whole calendar day `[date 00:00, date+1 00:00)`.
    ///
    /// # Errors
    /// Returns `Rejection::InvalidRange` for the last representable date, whose
    /// end has no following midnight.
    pub fn whole_day(date: NaiveDate) -> Result<Self> {
        Self::on_day(date, 0, MINUTES_PER_DAY)
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    /// Intervals that merely touch (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True if `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Minutes shared by both intervals, 0 when they do not overlap.
    pub fn overlap_minutes(&self, other: &Interval) -> i64 {
        self.intersection(other)
            .map(|i| i.duration_minutes())
            .unwrap_or(0)
    }

    /// The common part of both intervals, if any.
    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(Interval { start, end })
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

fn offset_from_midnight(date: NaiveDate, minutes: i64) -> Result<NaiveDateTime> {
    Duration::try_minutes(minutes)
        .and_then(|offset| date.and_time(NaiveTime::MIN).checked_add_signed(offset))
        .ok_or(Rejection::InvalidRange)
}
