//! Tests for the JSON layer behind the WASM exports (runs on native targets).

use serde_json::Value;
use slot_engine_wasm::json_api;

const CATALOG: &str = r#"{
    "courts": [
        {
            "id": "court-1",
            "name": "Court 1",
            "sport": "tennis",
            "location": "Riverside",
            "schedule": {"kind": "daily", "open": "08:00", "close": "22:00", "price": 12000}
        },
        {
            "id": "court-2",
            "name": "Court 2",
            "sport": "tennis",
            "location": "Riverside",
            "schedule": {"kind": "daily", "open": "08:00", "close": "12:00", "price": 9000}
        }
    ],
    "bookings": [
        {"resourceId": "court-1", "date": "2026-03-16", "start": "10:00", "end": "11:30"},
        {"resourceId": "court-1", "date": "2026-03-16", "start": "11:00", "end": "12:00"}
    ]
}"#;

const NOW: &str = "2026-03-10T09:00:00";

fn parse(json: &str) -> Value {
    serde_json::from_str(json).unwrap()
}

#[test]
fn eligible_request_reports_interval_and_price() {
    let request = r#"{"resourceId": "court-1", "date": "2026-03-16", "start": "12:00", "durationMinutes": 90}"#;
    let out = parse(&json_api::evaluate_request(CATALOG, request, NOW, "UTC").unwrap());

    assert_eq!(out["eligible"], true);
    assert_eq!(out["resourceId"], "court-1");
    assert_eq!(out["start"], "2026-03-16T12:00:00");
    assert_eq!(out["end"], "2026-03-16T13:30:00");
    assert_eq!(out["price"], 18000);
}

#[test]
fn rejected_request_is_data_not_error() {
    let request = r#"{"resourceId": "court-1", "date": "2026-03-16", "start": "11:00", "durationMinutes": 60}"#;
    let out = parse(&json_api::evaluate_request(CATALOG, request, NOW, "UTC").unwrap());

    assert_eq!(out["eligible"], false);
    assert_eq!(out["reason"], "slotConflict");
    assert!(out["message"].as_str().unwrap().contains("conflicts"));
}

#[test]
fn last_calendar_date_is_rejected_as_data() {
    let request = r#"{"resourceId": "court-1", "date": "+262142-12-31", "start": "23:30", "durationMinutes": 60}"#;
    let out = parse(&json_api::evaluate_request(CATALOG, request, NOW, "UTC").unwrap());
    assert_eq!(out["eligible"], false);
    assert_eq!(out["reason"], "invalidRange");

    assert!(json_api::slots_for_day(CATALOG, "court-1", "+262142-12-31", 30, NOW, "UTC").is_err());
}

#[test]
fn unknown_resource_is_an_error() {
    let request = r#"{"resourceId": "court-9", "date": "2026-03-16", "start": "11:00", "durationMinutes": 60}"#;
    let err = json_api::evaluate_request(CATALOG, request, NOW, "UTC").unwrap_err();
    assert!(err.contains("court-9"));
}

#[test]
fn rfc3339_now_is_converted_to_facility_time() {
    // Berlin is on CET (UTC+1) in mid-March: 09:30 UTC is 10:30 local.
    let request = r#"{"resourceId": "court-1", "date": "2026-03-16", "start": "10:00", "durationMinutes": 60}"#;
    let out = parse(
        &json_api::evaluate_request(CATALOG, request, "2026-03-16T09:30:00Z", "Europe/Berlin").unwrap(),
    );
    assert_eq!(out["reason"], "pastDate");
}

#[test]
fn naive_now_without_seconds_is_accepted() {
    let now = json_api::resolve_now("2026-03-16T10:15", "UTC").unwrap();
    assert_eq!(now.to_string(), "2026-03-16 10:15:00");
    assert!(json_api::resolve_now("yesterday", "UTC").is_err());
    assert!(json_api::resolve_now("2026-03-16T10:15:00Z", "Nowhere/Land").is_err());
}

#[test]
fn slot_grid_serializes_statuses() {
    let out = parse(&json_api::slots_for_day(CATALOG, "court-2", "2026-03-16", 60, NOW, "UTC").unwrap());
    let slots = out.as_array().unwrap();

    assert_eq!(slots.len(), 4);
    assert_eq!(slots[0]["start"], "08:00");
    assert_eq!(slots[0]["end"], "09:00");
    assert_eq!(slots[0]["status"], "available");
}

#[test]
fn zero_granularity_is_an_error() {
    assert!(json_api::slots_for_day(CATALOG, "court-2", "2026-03-16", 0, NOW, "UTC").is_err());
}

#[test]
fn bad_date_is_an_error() {
    let err = json_api::slots_for_day(CATALOG, "court-2", "16/03/2026", 60, NOW, "UTC").unwrap_err();
    assert!(err.contains("Invalid date"));
}

#[test]
fn free_windows_skip_bookings() {
    let out = parse(&json_api::free_windows_for_day(CATALOG, "court-1", "2026-03-16", NOW, "UTC").unwrap());
    let free = out.as_array().unwrap();

    assert_eq!(free.len(), 2);
    assert_eq!(free[0]["durationMinutes"], 120);
    assert_eq!(free[1]["start"], "2026-03-16T12:00:00");
}

#[test]
fn first_available_returns_null_when_nothing_fits() {
    let out = json_api::first_available_for_day(CATALOG, "court-2", "2026-03-16", 120, 30, "2026-03-16T11:00:00", "UTC")
        .unwrap();
    assert_eq!(out, "null");
}

#[test]
fn browse_courts_paginates() {
    let browse = r#"{"query": {"sport": "tennis", "maxPrice": 10000}, "page": 1, "perPage": 5}"#;
    let out = parse(&json_api::browse_courts(CATALOG, browse, NOW, "UTC").unwrap());

    assert_eq!(out["total"], 1);
    assert_eq!(out["items"][0]["id"], "court-2");
    assert_eq!(out["perPage"], 5);
}

#[test]
fn browse_defaults_apply() {
    let out = parse(&json_api::browse_courts(CATALOG, "{}", NOW, "UTC").unwrap());
    assert_eq!(out["total"], 2);
    assert_eq!(out["page"], 1);
    assert_eq!(out["perPage"], 12);
}

#[test]
fn double_bookings_reported() {
    let out = parse(&json_api::double_bookings(CATALOG).unwrap());
    let conflicts = out.as_array().unwrap();

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["resourceId"], "court-1");
    assert_eq!(conflicts[0]["overlapMinutes"], 30);
    assert_eq!(conflicts[0]["first"], "10:00-11:30");
}

#[test]
fn invalid_catalog_is_an_error() {
    let err = json_api::double_bookings("not json").unwrap_err();
    assert!(err.starts_with("Invalid catalog JSON"));
}
