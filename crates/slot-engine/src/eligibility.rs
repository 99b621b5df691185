//! Decide whether a single booking request can be made.

use chrono::NaiveDateTime;

use crate::booking::{Booking, BookingEligible, SlotRequest};
use crate::conflict::conflicts_with;
use crate::error::{Rejection, Result};
use crate::resource::{Resource, ResourceStatus};

/// Evaluate `request` against `resource` and its existing `bookings`.
///
/// Checks run in a fixed order and the first failure wins:
///
/// 1. `ResourceMismatch`: the request names another resource
/// 2. `InvalidDuration`: duration not offered by the resource
/// 3. `InvalidRange`: zero-length request
/// 4. `ResourceUnavailable`: resource closed or under maintenance
/// 5. `PastDate`: request starts before `now`
/// 6. `OutsideOperatingHours`: not inside a single opening window
/// 7. `SlotConflict`: overlaps an existing booking
///
/// `now` is facility-local wall time supplied by the caller; the function never
/// reads the clock, so identical inputs always give identical results.
pub fn evaluate<R: Resource + ?Sized>(
    resource: &R,
    bookings: &[Booking],
    request: &SlotRequest,
    now: NaiveDateTime,
) -> Result<BookingEligible> {
    if request.resource_id != resource.id() {
        return Err(Rejection::ResourceMismatch {
            expected: resource.id().to_string(),
            found: request.resource_id.clone(),
        });
    }

    if !resource
        .supported_durations()
        .contains(&request.duration_minutes)
    {
        return Err(Rejection::InvalidDuration {
            minutes: request.duration_minutes,
        });
    }

    let interval = request.interval()?;

    let status = resource.status();
    if status != ResourceStatus::Open {
        return Err(Rejection::ResourceUnavailable { status });
    }

    if interval.start < now {
        return Err(Rejection::PastDate);
    }

    let schedule = resource.schedule();
    if !schedule.covers(request.date, &interval) {
        return Err(Rejection::OutsideOperatingHours);
    }

    if conflicts_with(bookings, resource.id(), &interval) {
        return Err(Rejection::SlotConflict);
    }

    Ok(BookingEligible {
        resource_id: resource.id().to_string(),
        interval,
        price: schedule.quote(request.date, &interval),
    })
}
