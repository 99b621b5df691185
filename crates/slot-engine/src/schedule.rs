//! Operating schedules and their resolution into concrete opening windows.
//!
//! A schedule is either one daily open/close pair or a list of weekly rules
//! (days-of-week, start, end, hourly price). For a given date the rules are
//! resolved into [`Window`]s, then normalised: windows that touch and share a
//! price are merged, so a morning tier and an evening tier at the same price
//! behave as one continuous opening.
//!
//! A rule whose start is after its end (e.g. `22:00`–`02:00`) wraps into the
//! following day. A rule whose start equals its end is empty.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::Result;
use crate::interval::Interval;
use crate::resource::Resource;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// When a resource is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Schedule {
    /// Same hours every day of the week.
    Daily {
        open: ClockTime,
        close: ClockTime,
        /// Hourly price in minor currency units.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        price: Option<u32>,
    },
    /// Day-of-week specific rules, possibly several per day.
    Weekly { rules: Vec<ScheduleRule> },
}

/// One weekly opening rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRule {
    pub days: Vec<Weekday>,
    pub start: ClockTime,
    pub end: ClockTime,
    /// Hourly price in minor currency units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
}

/// A resolved opening window with its hourly price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub interval: Interval,
    pub price: Option<u32>,
}

impl Schedule {
    /// Normalised opening windows that touch `date`.
    ///
    /// Empty for the last representable date.
    ///
    /// Rules from the previous day (wrapping past midnight) and the next day
    /// (continuing an opening that runs through midnight) are included before
    /// merging, so a window may extend beyond the calendar day.
    pub fn windows(&self, date: NaiveDate) -> Vec<Window> {
        let raw: Vec<Window> = [date.pred_opt(), Some(date), date.succ_opt()]
            .into_iter()
            .flatten()
            .flat_map(|day| self.day_windows(day))
            .collect();

        let Ok(day) = Interval::whole_day(date) else {
            return Vec::new();
        };
        normalize_windows(raw)
            .into_iter()
            .filter(|w| w.interval.overlaps(&day))
            .collect()
    }

    /// True if `interval` lies entirely inside one opening window of `date`.
    pub fn covers(&self, date: NaiveDate, interval: &Interval) -> bool {
        self.windows(date)
            .iter()
            .any(|w| w.interval.contains(interval))
    }

    /// Price of `interval` in minor currency units, rounded half up to a
    /// whole unit.
    ///
    /// Returns `None` if any part of the interval is outside opening hours or
    /// falls in a window without a price.
    pub fn quote(&self, date: NaiveDate, interval: &Interval) -> Option<u64> {
        let mut covered = 0i64;
        let mut price_minutes = 0u64;

        for window in self.windows(date) {
            let minutes = window.interval.overlap_minutes(interval);
            if minutes == 0 {
                continue;
            }
            let price = window.price?;
            covered += minutes;
            price_minutes += u64::from(price) * minutes as u64;
        }

        (covered == interval.duration_minutes()).then_some((price_minutes + 30) / 60)
    }

    /// The cheapest hourly price across all rules, if any rule is priced.
    pub fn lowest_price(&self) -> Option<u32> {
        match self {
            Schedule::Daily { price, .. } => *price,
            Schedule::Weekly { rules } => rules.iter().filter_map(|r| r.price).min(),
        }
    }

    /// Raw, unmerged windows contributed by the rules of `date`'s weekday.
    fn day_windows(&self, date: NaiveDate) -> Vec<Window> {
        let spans: Vec<(ClockTime, ClockTime, Option<u32>)> = match self {
            Schedule::Daily { open, close, price } => vec![(*open, *close, *price)],
            Schedule::Weekly { rules } => rules
                .iter()
                .filter(|r| r.days.contains(&date.weekday()))
                .map(|r| (r.start, r.end, r.price))
                .collect(),
        };

        spans
            .into_iter()
            .filter(|(start, end, _)| start != end)
            .filter_map(|(start, end, price)| {
                let start_minute = i64::from(start.minutes());
                let mut end_minute = i64::from(end.minutes());
                if end_minute < start_minute {
                    end_minute += MINUTES_PER_DAY;
                }
                Interval::on_day(date, start_minute, end_minute)
                    .ok()
                    .map(|interval| Window { interval, price })
            })
            .collect()
    }
}

/// Sort windows and merge those that overlap or touch and share a price.
///
/// Windows with different prices are kept apart even when adjacent.
pub fn normalize_windows(mut windows: Vec<Window>) -> Vec<Window> {
    windows.sort_by_key(|w| (w.interval.start, w.interval.end));

    let mut merged: Vec<Window> = Vec::with_capacity(windows.len());
    for window in windows {
        if let Some(last) = merged.last_mut() {
            if last.price == window.price && window.interval.start <= last.interval.end {
                last.interval.end = last.interval.end.max(window.interval.end);
                continue;
            }
        }
        merged.push(window);
    }
    merged
}

/// True iff `[start, end)` on `date` is fully inside one of the resource's
/// opening windows.
///
/// # Errors
/// Returns `Rejection::InvalidRange` when `end <= start`.
pub fn is_within_operating_hours<R: Resource + ?Sized>(
    resource: &R,
    date: NaiveDate,
    start: ClockTime,
    end: ClockTime,
) -> Result<bool> {
    let interval = Interval::on_day(date, i64::from(start.minutes()), i64::from(end.minutes()))?;
    Ok(resource.schedule().covers(date, &interval))
}
