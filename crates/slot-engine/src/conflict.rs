//! Detect overlaps between a candidate range and existing bookings.
//!
//! Ranges are half-open, so a booking ending at 11:30 and another starting at
//! 11:30 do NOT conflict.

use chrono::NaiveDate;

use crate::booking::Booking;
use crate::clock::ClockTime;
use crate::error::Result;
use crate::interval::Interval;

/// Two bookings of the same resource that overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub booking_a: Booking,
    pub booking_b: Booking,
    pub overlap_minutes: i64,
}

/// True if any booking of `resource_id` overlaps `[start, end)` on `date`.
///
/// # Errors
/// Returns `Rejection::InvalidRange` when `end <= start`.
pub fn has_conflict(
    bookings: &[Booking],
    resource_id: &str,
    date: NaiveDate,
    start: ClockTime,
    end: ClockTime,
) -> Result<bool> {
    let candidate = Interval::on_day(date, i64::from(start.minutes()), i64::from(end.minutes()))?;
    Ok(conflicts_with(bookings, resource_id, &candidate))
}

/// True if any booking of `resource_id` overlaps `candidate`.
///
/// Bookings are compared on absolute wall time, so a candidate running past
/// midnight is also checked against the next day's bookings. Malformed bookings
/// (`end <= start`) are ignored.
pub fn conflicts_with(bookings: &[Booking], resource_id: &str, candidate: &Interval) -> bool {
    busy_intervals(bookings, resource_id)
        .iter()
        .any(|busy| busy.overlaps(candidate))
}

/// The well-formed booked ranges of one resource.
pub(crate) fn busy_intervals(bookings: &[Booking], resource_id: &str) -> Vec<Interval> {
    bookings
        .iter()
        .filter(|b| b.resource_id == resource_id)
        .filter_map(|b| b.interval().ok())
        .collect()
}

/// Find every pair of bookings on the same resource whose ranges overlap.
///
/// This audits data coming from the backend, which should never hold a double
/// booking. Pairs are reported once, in input order.
pub fn find_double_bookings(bookings: &[Booking]) -> Vec<Conflict> {
    let intervals: Vec<Option<Interval>> = bookings.iter().map(|b| b.interval().ok()).collect();
    let mut conflicts = Vec::new();

    for (i, a) in bookings.iter().enumerate() {
        let Some(ia) = intervals[i] else { continue };
        for (j, b) in bookings.iter().enumerate().skip(i + 1) {
            let Some(ib) = intervals[j] else { continue };
            if a.resource_id != b.resource_id || !ia.overlaps(&ib) {
                continue;
            }
            conflicts.push(Conflict {
                booking_a: a.clone(),
                booking_b: b.clone(),
                overlap_minutes: ia.overlap_minutes(&ib),
            });
        }
    }

    conflicts
}
