//! Wall-clock times of day and "now" resolution.
//!
//! [`ClockTime`] counts whole minutes from midnight and allows `24:00`, which
//! `chrono::NaiveTime` cannot represent but opening hours need ("closes at
//! midnight").

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A time of day between `00:00` and `24:00` inclusive, minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);
    pub const END_OF_DAY: ClockTime = ClockTime(MINUTES_PER_DAY);

    /// Build a time from hours and minutes. `24:00` is the only valid hour-24 value.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, EngineError> {
        if minute >= 60 || hour > 24 || (hour == 24 && minute != 0) {
            return Err(EngineError::InvalidTime(format!("{:02}:{:02}", hour, minute)));
        }
        Ok(Self((hour * 60 + minute) as u16))
    }

    /// Build a time from minutes past midnight (0..=1440).
    pub fn from_minutes(minutes: u32) -> Result<Self, EngineError> {
        if minutes > u32::from(MINUTES_PER_DAY) {
            return Err(EngineError::InvalidTime(format!("{} minutes", minutes)));
        }
        Ok(Self(minutes as u16))
    }

    /// Minutes past midnight.
    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    pub fn hour(self) -> u32 {
        self.minutes() / 60
    }

    pub fn minute(self) -> u32 {
        self.minutes() % 60
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = EngineError;

    /// Parse `"HH:MM"`. A trailing `":SS"` of zero seconds is tolerated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidTime(s.to_string());
        let mut parts = s.trim().split(':');

        let hour: u32 = parts
            .next()
            .filter(|p| !p.is_empty() && p.len() <= 2)
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        let minute: u32 = parts
            .next()
            .filter(|p| p.len() == 2)
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;

        match parts.next() {
            None | Some("00") => {}
            Some(_) => return Err(invalid()),
        }
        if parts.next().is_some() {
            return Err(invalid());
        }

        Self::from_hm(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// Convert a UTC instant into the facility's wall-clock time.
///
/// Callers read the clock; the engine only ever receives the result.
///
/// # Errors
/// Returns `EngineError::InvalidTimezone` if `timezone` is not an IANA identifier.
pub fn local_now(instant: DateTime<Utc>, timezone: &str) -> Result<NaiveDateTime, EngineError> {
    let tz: chrono_tz::Tz = timezone
        .parse()
        .map_err(|_| EngineError::InvalidTimezone(timezone.to_string()))?;
    Ok(instant.with_timezone(&tz).naive_local())
}
