//! In-memory catalog of courts, coaches and bookings, with browse filters and
//! pagination.
//!
//! The catalog mirrors what the booking front end fetches from the backend. It
//! is read-only: filters return borrowed views and never modify the records.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::booking::{Booking, SlotRequest};
use crate::clock::ClockTime;
use crate::eligibility::evaluate;
use crate::error::EngineError;
use crate::resource::{Coach, Court, Resource, ResourceStatus};

/// Everything the engine can be asked about, as delivered by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub courts: Vec<Court>,
    #[serde(default)]
    pub coaches: Vec<Coach>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

impl Catalog {
    /// Parse a catalog from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Look up a court or coach by id. Courts win if an id is reused.
    pub fn resource(&self, id: &str) -> Option<&dyn Resource> {
        if let Some(court) = self.courts.iter().find(|c| c.id == id) {
            return Some(court as &dyn Resource);
        }
        self.coaches
            .iter()
            .find(|c| c.id == id)
            .map(|c| c as &dyn Resource)
    }

    /// Like [`Catalog::resource`] but fails with `EngineError::UnknownResource`.
    pub fn require(&self, id: &str) -> Result<&dyn Resource, EngineError> {
        self.resource(id)
            .ok_or_else(|| EngineError::UnknownResource(id.to_string()))
    }

    /// Bookings of one resource, in catalog order.
    pub fn bookings_for<'a>(&'a self, resource_id: &'a str) -> impl Iterator<Item = &'a Booking> + 'a {
        self.bookings
            .iter()
            .filter(move |b| b.resource_id == resource_id)
    }

    /// Courts matching every criterion of `query`.
    pub fn browse_courts(&self, query: &BrowseQuery, now: NaiveDateTime) -> Vec<&Court> {
        self.courts
            .iter()
            .filter(|c| query.matches(*c, &self.bookings, now))
            .collect()
    }

    /// Coaches matching every criterion of `query`.
    pub fn browse_coaches(&self, query: &BrowseQuery, now: NaiveDateTime) -> Vec<&Coach> {
        self.coaches
            .iter()
            .filter(|c| query.matches(*c, &self.bookings, now))
            .collect()
    }
}

/// Browse criteria. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseQuery {
    /// Exact sport name, case-insensitive.
    #[serde(default)]
    pub sport: Option<String>,
    /// Case-insensitive substring of the location.
    #[serde(default)]
    pub location: Option<String>,
    /// Maximum hourly price; resources without any price are excluded.
    #[serde(default)]
    pub max_price: Option<u32>,
    #[serde(default)]
    pub status: Option<ResourceStatus>,
    /// Only keep resources that could take this booking.
    #[serde(default)]
    pub available: Option<AvailabilityFilter>,
}

/// A hypothetical booking used to filter by availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityFilter {
    pub date: NaiveDate,
    pub start: ClockTime,
    pub duration_minutes: u32,
}

/// Browse-only attributes shared by courts and coaches.
trait Listing: Resource {
    fn offers(&self, sport: &str) -> bool;
    fn location(&self) -> Option<&str>;
}

impl Listing for Court {
    fn offers(&self, sport: &str) -> bool {
        self.sport.eq_ignore_ascii_case(sport)
    }

    fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl Listing for Coach {
    fn offers(&self, sport: &str) -> bool {
        self.sports.iter().any(|s| s.eq_ignore_ascii_case(sport))
    }

    fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl BrowseQuery {
    fn matches<L: Listing>(&self, item: &L, bookings: &[Booking], now: NaiveDateTime) -> bool {
        if let Some(sport) = &self.sport {
            if !item.offers(sport) {
                return false;
            }
        }

        if let Some(needle) = &self.location {
            let needle = needle.to_lowercase();
            match item.location() {
                Some(location) if location.to_lowercase().contains(&needle) => {}
                _ => return false,
            }
        }

        if let Some(max) = self.max_price {
            match item.schedule().lowest_price() {
                Some(price) if price <= max => {}
                _ => return false,
            }
        }

        if let Some(status) = self.status {
            if item.status() != status {
                return false;
            }
        }

        if let Some(filter) = &self.available {
            let request = SlotRequest {
                resource_id: item.id().to_string(),
                date: filter.date,
                start: filter.start,
                duration_minutes: filter.duration_minutes,
            };
            if evaluate(item, bookings, &request, now).is_err() {
                return false;
            }
        }

        true
    }
}

/// One page of a longer list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Cut page `page` (1-based) of `per_page` items out of `items`.
///
/// Page 0 is treated as page 1 and `per_page` is at least 1. A page past the
/// end is empty but still reports the correct totals.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page);

    let start = (page - 1).saturating_mul(per_page).min(total);
    let end = start.saturating_add(per_page).min(total);

    Page {
        items: items[start..end].to_vec(),
        page,
        per_page,
        total,
        total_pages,
    }
}
