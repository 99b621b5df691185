//! Committed bookings, candidate requests and accepted results.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::Result;
use crate::interval::Interval;

/// A reservation already held by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub resource_id: String,
    pub date: NaiveDate,
    pub start: ClockTime,
    pub end: ClockTime,
}

impl Booking {
    /// The booked range. Fails for malformed records where `end <= start`.
    pub fn interval(&self) -> Result<Interval> {
        Interval::on_day(
            self.date,
            i64::from(self.start.minutes()),
            i64::from(self.end.minutes()),
        )
    }
}

/// A reservation being considered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRequest {
    pub resource_id: String,
    pub date: NaiveDate,
    pub start: ClockTime,
    pub duration_minutes: u32,
}

impl SlotRequest {
    /// `[start, start + duration)`; may run past midnight.
    ///
    /// # Errors
    /// Returns `Rejection::InvalidRange` for a zero duration.
    pub fn interval(&self) -> Result<Interval> {
        let start = i64::from(self.start.minutes());
        Interval::on_day(self.date, start, start + i64::from(self.duration_minutes))
    }
}

/// A request that passed every check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingEligible {
    pub resource_id: String,
    pub interval: Interval,
    /// Quoted price in minor currency units, when the opening hours are priced.
    pub price: Option<u64>,
}
