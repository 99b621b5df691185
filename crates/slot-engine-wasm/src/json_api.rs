//! JSON-in, JSON-out wrappers around slot-engine.
//!
//! These functions hold all the logic behind the WASM exports but return plain
//! `String` errors, so they run (and are tested) on native targets too.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use slot_engine::{
    enumerate_slots, evaluate, find_double_bookings, first_available, free_windows, local_now,
    paginate, BrowseQuery, Catalog, Court, Rejection, Slot, SlotRequest,
};

pub type ApiResult = Result<String, String>;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Outcome of `evaluateRequest`. Rejections are data, not thrown errors.
#[derive(Serialize)]
#[serde(untagged)]
enum EvaluationDto {
    Eligible {
        eligible: bool,
        #[serde(rename = "resourceId")]
        resource_id: String,
        start: String,
        end: String,
        price: Option<u64>,
    },
    Rejected {
        eligible: bool,
        message: String,
        #[serde(flatten)]
        rejection: Rejection,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConflictDto {
    resource_id: String,
    date: NaiveDate,
    first: String,
    second: String,
    overlap_minutes: i64,
}

/// Browse request: the query plus paging.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrowseInput {
    #[serde(default)]
    query: BrowseQuery,
    #[serde(default = "default_page")]
    page: usize,
    #[serde(default = "default_per_page")]
    per_page: usize,
}

fn default_page() -> usize {
    1
}

fn default_per_page() -> usize {
    12
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve a caller-supplied "now" into facility wall time.
///
/// Accepts RFC 3339 (converted into `timezone`) or a naive local datetime
/// (`2026-02-17T14:00:00` or `2026-02-17T14:00`), which is taken as-is.
pub fn resolve_now(now: &str, timezone: &str) -> Result<NaiveDateTime, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(now) {
        return local_now(dt.with_timezone(&Utc), timezone).map_err(|e| e.to_string());
    }
    NaiveDateTime::parse_from_str(now, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(now, "%Y-%m-%dT%H:%M"))
        .map_err(|e| format!("Invalid datetime '{}': {}", now, e))
}

fn parse_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| format!("Invalid date '{}': {}", date, e))
}

fn parse_catalog(json: &str) -> Result<Catalog, String> {
    Catalog::from_json(json).map_err(|e| format!("Invalid catalog JSON: {}", e))
}

fn to_json<T: Serialize>(value: &T) -> ApiResult {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Evaluate one `SlotRequest` (JSON) against the catalog.
pub fn evaluate_request(catalog_json: &str, request_json: &str, now: &str, timezone: &str) -> ApiResult {
    let catalog = parse_catalog(catalog_json)?;
    let request: SlotRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid request JSON: {}", e))?;
    let now = resolve_now(now, timezone)?;
    let resource = catalog.require(&request.resource_id).map_err(|e| e.to_string())?;

    let dto = match evaluate(resource, &catalog.bookings, &request, now) {
        Ok(ok) => EvaluationDto::Eligible {
            eligible: true,
            resource_id: ok.resource_id,
            start: ok.interval.start.format("%Y-%m-%dT%H:%M:%S").to_string(),
            end: ok.interval.end.format("%Y-%m-%dT%H:%M:%S").to_string(),
            price: ok.price,
        },
        Err(rejection) => EvaluationDto::Rejected {
            eligible: false,
            message: rejection.to_string(),
            rejection,
        },
    };
    to_json(&dto)
}

/// The slot grid of one resource for one day.
pub fn slots_for_day(
    catalog_json: &str,
    resource_id: &str,
    date: &str,
    granularity_minutes: u32,
    now: &str,
    timezone: &str,
) -> ApiResult {
    let catalog = parse_catalog(catalog_json)?;
    let resource = catalog.require(resource_id).map_err(|e| e.to_string())?;
    let date = parse_date(date)?;
    let now = resolve_now(now, timezone)?;

    let grid = enumerate_slots(resource, &catalog.bookings, date, granularity_minutes, now)
        .map_err(|e| e.to_string())?;
    let slots: Vec<Slot> = grid.iter().collect();
    to_json(&slots)
}

/// Free windows of one resource for one day.
pub fn free_windows_for_day(
    catalog_json: &str,
    resource_id: &str,
    date: &str,
    now: &str,
    timezone: &str,
) -> ApiResult {
    let catalog = parse_catalog(catalog_json)?;
    let resource = catalog.require(resource_id).map_err(|e| e.to_string())?;
    let date = parse_date(date)?;
    let now = resolve_now(now, timezone)?;

    to_json(&free_windows(resource, &catalog.bookings, date, now))
}

/// The earliest bookable start, or `null`.
pub fn first_available_for_day(
    catalog_json: &str,
    resource_id: &str,
    date: &str,
    duration_minutes: u32,
    step_minutes: u32,
    now: &str,
    timezone: &str,
) -> ApiResult {
    let catalog = parse_catalog(catalog_json)?;
    let resource = catalog.require(resource_id).map_err(|e| e.to_string())?;
    let date = parse_date(date)?;
    let now = resolve_now(now, timezone)?;

    let found = first_available(resource, &catalog.bookings, date, duration_minutes, step_minutes, now);
    to_json(&found)
}

/// Filter and paginate courts. `browse_json` is `{query, page, perPage}`.
pub fn browse_courts(catalog_json: &str, browse_json: &str, now: &str, timezone: &str) -> ApiResult {
    let catalog = parse_catalog(catalog_json)?;
    let input: BrowseInput =
        serde_json::from_str(browse_json).map_err(|e| format!("Invalid browse JSON: {}", e))?;
    let now = resolve_now(now, timezone)?;

    let courts: Vec<&Court> = catalog.browse_courts(&input.query, now);
    to_json(&paginate(&courts, input.page, input.per_page))
}

/// Audit the catalog's bookings for overlaps.
pub fn double_bookings(catalog_json: &str) -> ApiResult {
    let catalog = parse_catalog(catalog_json)?;
    let dtos: Vec<ConflictDto> = find_double_bookings(&catalog.bookings)
        .into_iter()
        .map(|c| ConflictDto {
            first: format!("{}-{}", c.booking_a.start, c.booking_a.end),
            second: format!("{}-{}", c.booking_b.start, c.booking_b.end),
            resource_id: c.booking_a.resource_id,
            date: c.booking_a.date,
            overlap_minutes: c.overlap_minutes,
        })
        .collect();
    to_json(&dtos)
}
