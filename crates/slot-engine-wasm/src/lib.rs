//! WASM bindings for slot-engine.
//!
//! Exposes request evaluation, slot grids, free windows and court browsing to
//! the booking front end via `wasm-bindgen`. All complex types are passed as
//! JSON strings. "Now" is passed in by the caller as an RFC 3339 instant (plus
//! the facility's IANA timezone) or as a naive local datetime.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/src/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

pub mod json_api;

use wasm_bindgen::prelude::*;

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Evaluate a booking request.
///
/// `request_json` is `{resourceId, date, start, durationMinutes}`. Returns
/// `{"eligible": true, resourceId, start, end, price}` or
/// `{"eligible": false, reason, message, ...}`. Throws only on malformed input.
#[wasm_bindgen(js_name = "evaluateRequest")]
pub fn evaluate_request(
    catalog_json: &str,
    request_json: &str,
    now: &str,
    timezone: &str,
) -> Result<String, JsValue> {
    json_api::evaluate_request(catalog_json, request_json, now, timezone).map_err(js_err)
}

/// Build the slot grid for one resource and day.
///
/// Returns a JSON array of `{date, start, end, status}` where `status` is one of
/// `available`, `booked`, `outside-hours`, `past`, `unavailable`.
#[wasm_bindgen(js_name = "enumerateSlots")]
pub fn enumerate_slots(
    catalog_json: &str,
    resource_id: &str,
    date: &str,
    granularity_minutes: u32,
    now: &str,
    timezone: &str,
) -> Result<String, JsValue> {
    json_api::slots_for_day(catalog_json, resource_id, date, granularity_minutes, now, timezone)
        .map_err(js_err)
}

/// Free windows inside opening hours, as `{start, end, durationMinutes, price}`.
#[wasm_bindgen(js_name = "findFreeWindows")]
pub fn find_free_windows(
    catalog_json: &str,
    resource_id: &str,
    date: &str,
    now: &str,
    timezone: &str,
) -> Result<String, JsValue> {
    json_api::free_windows_for_day(catalog_json, resource_id, date, now, timezone).map_err(js_err)
}

/// The earliest bookable start of `duration_minutes`, or `null`.
#[wasm_bindgen(js_name = "firstAvailable")]
pub fn first_available(
    catalog_json: &str,
    resource_id: &str,
    date: &str,
    duration_minutes: u32,
    step_minutes: u32,
    now: &str,
    timezone: &str,
) -> Result<String, JsValue> {
    json_api::first_available_for_day(
        catalog_json,
        resource_id,
        date,
        duration_minutes,
        step_minutes,
        now,
        timezone,
    )
    .map_err(js_err)
}

/// Filter and paginate courts. `browse_json` is `{query, page, perPage}`.
#[wasm_bindgen(js_name = "browseCourts")]
pub fn browse_courts(
    catalog_json: &str,
    browse_json: &str,
    now: &str,
    timezone: &str,
) -> Result<String, JsValue> {
    json_api::browse_courts(catalog_json, browse_json, now, timezone).map_err(js_err)
}

/// Pairs of overlapping bookings in the catalog.
#[wasm_bindgen(js_name = "findDoubleBookings")]
pub fn find_double_bookings(catalog_json: &str) -> Result<String, JsValue> {
    json_api::double_bookings(catalog_json).map_err(js_err)
}
