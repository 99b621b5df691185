//! Free time inside opening hours, and the earliest bookable start.
//!
//! Busy periods are sorted and merged, then the gaps between them are taken
//! within each opening window of the day.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::booking::{Booking, BookingEligible, SlotRequest};
use crate::clock::ClockTime;
use crate::conflict::busy_intervals;
use crate::eligibility::evaluate;
use crate::interval::Interval;
use crate::resource::{Resource, ResourceStatus};

/// A stretch of bookable time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: i64,
    /// Hourly price of the opening window this gap belongs to.
    pub price: Option<u32>,
}

/// Merge overlapping or adjacent busy periods that fall inside `window`.
///
/// Returns a sorted, non-overlapping list clipped to the window.
fn merge_busy_periods(busy: &[Interval], window: &Interval) -> Vec<Interval> {
    let mut intervals: Vec<Interval> = busy
        .iter()
        .filter_map(|b| b.intersection(window))
        .collect();

    intervals.sort();

    let mut merged: Vec<Interval> = Vec::new();
    for interval in intervals {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

/// Free windows of `resource` on `date` that start no earlier than `now`.
///
/// Each opening window is clipped to the calendar day. A resource that is not
/// open has no free time.
pub fn free_windows<R: Resource + ?Sized>(
    resource: &R,
    bookings: &[Booking],
    date: NaiveDate,
    now: NaiveDateTime,
) -> Vec<FreeWindow> {
    if resource.status() != ResourceStatus::Open {
        return Vec::new();
    }

    let Ok(day) = Interval::whole_day(date) else {
        return Vec::new();
    };
    let busy = busy_intervals(bookings, resource.id());
    let mut free = Vec::new();

    for window in resource.schedule().windows(date) {
        let Some(clipped) = window.interval.intersection(&day) else {
            continue;
        };
        let Ok(open) = Interval::new(clipped.start.max(now), clipped.end) else {
            continue;
        };

        let mut cursor = open.start;
        for period in merge_busy_periods(&busy, &open) {
            if cursor < period.start {
                free.push(free_window(cursor, period.start, window.price));
            }
            cursor = cursor.max(period.end);
        }

        // Trailing gap after the last busy period.
        if cursor < open.end {
            free.push(free_window(cursor, open.end, window.price));
        }
    }

    free
}

fn free_window(start: NaiveDateTime, end: NaiveDateTime, price: Option<u32>) -> FreeWindow {
    FreeWindow {
        start,
        end,
        duration_minutes: (end - start).num_minutes(),
        price,
    }
}

/// The earliest start on `date`, on a `step_minutes` grid from midnight, that
/// [`evaluate`] accepts for `duration_minutes`.
///
/// Returns `None` if nothing fits or `step_minutes` is zero.
pub fn first_available<R: Resource + ?Sized>(
    resource: &R,
    bookings: &[Booking],
    date: NaiveDate,
    duration_minutes: u32,
    step_minutes: u32,
    now: NaiveDateTime,
) -> Option<BookingEligible> {
    if step_minutes == 0 {
        return None;
    }

    (0..ClockTime::END_OF_DAY.minutes())
        .step_by(step_minutes as usize)
        .filter_map(|minute| ClockTime::from_minutes(minute).ok())
        .find_map(|start| {
            let request = SlotRequest {
                resource_id: resource.id().to_string(),
                date,
                start,
                duration_minutes,
            };
            evaluate(resource, bookings, &request, now).ok()
        })
}
