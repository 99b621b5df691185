//! Display slot grids for a single day.
//!
//! [`enumerate_slots`] resolves the opening windows and bookings once, then
//! hands back a [`SlotGrid`] whose [`SlotGrid::iter`] lazily walks the day in
//! fixed steps. The grid can be iterated any number of times.

use std::iter::FusedIterator;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::booking::Booking;
use crate::clock::ClockTime;
use crate::conflict::busy_intervals;
use crate::error::{Rejection, Result};
use crate::interval::Interval;
use crate::resource::{Resource, ResourceStatus};
use crate::schedule::Window;

/// Display state of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotStatus {
    Available,
    Booked,
    OutsideHours,
    Past,
    /// The resource is closed or under maintenance.
    Unavailable,
}

/// A contiguous time range of a day with its computed status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub date: NaiveDate,
    pub start: ClockTime,
    pub end: ClockTime,
    pub status: SlotStatus,
}

/// The slots of one resource on one day.
#[derive(Debug, Clone)]
pub struct SlotGrid {
    date: NaiveDate,
    granularity: u32,
    now: NaiveDateTime,
    open: bool,
    windows: Vec<Window>,
    busy: Vec<Interval>,
    /// Minutes past midnight where the grid starts and ends.
    first: u32,
    last: u32,
}

/// Build the slot grid of `resource` for `date`, stepping by `granularity_minutes`.
///
/// The grid spans from the earliest opening to the latest closing of the day,
/// clipped to the calendar day. Gaps between windows appear as
/// `OutsideHours` slots. Only whole slots are produced.
///
/// # Errors
/// Returns `Rejection::InvalidRange` for a zero granularity, or for a date at
/// the end of the calendar.
pub fn enumerate_slots<R: Resource + ?Sized>(
    resource: &R,
    bookings: &[Booking],
    date: NaiveDate,
    granularity_minutes: u32,
    now: NaiveDateTime,
) -> Result<SlotGrid> {
    if granularity_minutes == 0 {
        return Err(Rejection::InvalidRange);
    }

    let windows = resource.schedule().windows(date);
    let day = Interval::whole_day(date)?;
    let midnight = day.start;

    let (first, last) = windows
        .iter()
        .filter_map(|w| w.interval.intersection(&day))
        .map(|clip| {
            (
                (clip.start - midnight).num_minutes() as u32,
                (clip.end - midnight).num_minutes() as u32,
            )
        })
        .fold(None, |acc: Option<(u32, u32)>, (s, e)| match acc {
            Some((lo, hi)) => Some((lo.min(s), hi.max(e))),
            None => Some((s, e)),
        })
        .unwrap_or((0, 0));

    Ok(SlotGrid {
        date,
        granularity: granularity_minutes,
        now,
        open: resource.status() == ResourceStatus::Open,
        windows,
        busy: busy_intervals(bookings, resource.id()),
        first,
        last,
    })
}

impl SlotGrid {
    /// A fresh iterator over the grid, from the first slot.
    pub fn iter(&self) -> SlotIter<'_> {
        SlotIter {
            grid: self,
            cursor: self.first,
        }
    }

    pub fn len(&self) -> usize {
        self.remaining_from(self.first)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn granularity(&self) -> u32 {
        self.granularity
    }

    fn remaining_from(&self, cursor: u32) -> usize {
        if cursor >= self.last {
            return 0;
        }
        ((self.last - cursor) / self.granularity) as usize
    }

    fn status_of(&self, interval: &Interval) -> SlotStatus {
        if !self.open {
            SlotStatus::Unavailable
        } else if !self.windows.iter().any(|w| w.interval.contains(interval)) {
            SlotStatus::OutsideHours
        } else if interval.start < self.now {
            SlotStatus::Past
        } else if self.busy.iter().any(|b| b.overlaps(interval)) {
            SlotStatus::Booked
        } else {
            SlotStatus::Available
        }
    }
}

impl<'g> IntoIterator for &'g SlotGrid {
    type Item = Slot;
    type IntoIter = SlotIter<'g>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy walk over a [`SlotGrid`], in ascending start order.
#[derive(Debug, Clone)]
pub struct SlotIter<'g> {
    grid: &'g SlotGrid,
    cursor: u32,
}

impl Iterator for SlotIter<'_> {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        let grid = self.grid;
        let start = self.cursor;
        let end = start.checked_add(grid.granularity)?;
        if end > grid.last {
            return None;
        }
        self.cursor = end;

        let interval = Interval::on_day(grid.date, i64::from(start), i64::from(end)).ok()?;
        Some(Slot {
            date: grid.date,
            start: ClockTime::from_minutes(start).ok()?,
            end: ClockTime::from_minutes(end).ok()?,
            status: grid.status_of(&interval),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.remaining_from(self.cursor);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SlotIter<'_> {}

impl FusedIterator for SlotIter<'_> {}
