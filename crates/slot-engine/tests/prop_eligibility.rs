//! Property-based tests for booking eligibility and slot grids using proptest.
//!
//! These verify invariants that should hold for *any* well-formed input, not
//! just the cases in `eligibility_tests.rs`.

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use slot_engine::{
    enumerate_slots, evaluate, has_conflict, Booking, ClockTime, Court, Rejection, ResourceStatus,
    Schedule, SlotRequest, SlotStatus,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

const DURATIONS: [u32; 4] = [30, 60, 90, 120];

fn arb_duration() -> impl Strategy<Value = u32> {
    prop::sample::select(DURATIONS.to_vec())
}

/// A start time on a quarter-hour between 00:00 and 23:45.
fn arb_start() -> impl Strategy<Value = u32> {
    (0u32..96).prop_map(|q| q * 15)
}

/// Opening hours: open between 05:00 and 12:00, close between 14:00 and 24:00.
fn arb_hours() -> impl Strategy<Value = (u32, u32)> {
    ((5u32..=12).prop_map(|h| h * 60), (14u32..=24).prop_map(|h| h * 60))
}

/// Up to six bookings that fit inside the day.
fn arb_bookings() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec((arb_start(), arb_duration()), 0..6).prop_map(|raw| {
        raw.into_iter()
            .filter(|(s, d)| s + d <= 1440)
            .map(|(s, d)| (s, s + d))
            .collect()
    })
}

/// "Now" anywhere from two days before to the evening of the test date.
fn arb_now() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..(3 * 24 * 60)).prop_map(|m| {
        day().and_hms_opt(0, 0, 0).unwrap() - chrono::Duration::days(2) + chrono::Duration::minutes(m)
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

fn clock(minutes: u32) -> ClockTime {
    ClockTime::from_minutes(minutes).unwrap()
}

fn court(open: u32, close: u32) -> Court {
    Court {
        id: "court-1".to_string(),
        name: "Court".to_string(),
        sport: "tennis".to_string(),
        location: None,
        schedule: Schedule::Daily {
            open: clock(open),
            close: clock(close),
            price: Some(6000),
        },
        status: ResourceStatus::Open,
        durations: DURATIONS.to_vec(),
    }
}

fn bookings(ranges: &[(u32, u32)]) -> Vec<Booking> {
    ranges
        .iter()
        .map(|&(s, e)| Booking {
            resource_id: "court-1".to_string(),
            date: day(),
            start: clock(s),
            end: clock(e),
        })
        .collect()
}

fn request(start: u32, duration: u32) -> SlotRequest {
    SlotRequest {
        resource_id: "court-1".to_string(),
        date: day(),
        start: clock(start),
        duration_minutes: duration,
    }
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: has_conflict agrees with the half-open overlap rule
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn conflict_matches_half_open_overlap(
        s1 in arb_start(), d1 in arb_duration(),
        s2 in arb_start(), d2 in arb_duration(),
    ) {
        let (e1, e2) = (s1 + d1, s2 + d2);
        prop_assume!(e1 <= 1440 && e2 <= 1440);

        let existing = bookings(&[(s1, e1)]);
        let conflict = has_conflict(&existing, "court-1", day(), clock(s2), clock(e2)).unwrap();

        prop_assert_eq!(conflict, s1 < e2 && s2 < e1);
    }
}

// ---------------------------------------------------------------------------
// Property 2: conflict is symmetric
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn conflict_is_symmetric(
        s1 in arb_start(), d1 in arb_duration(),
        s2 in arb_start(), d2 in arb_duration(),
    ) {
        let (e1, e2) = (s1 + d1, s2 + d2);
        prop_assume!(e1 <= 1440 && e2 <= 1440);

        let a_vs_b = has_conflict(&bookings(&[(s1, e1)]), "court-1", day(), clock(s2), clock(e2)).unwrap();
        let b_vs_a = has_conflict(&bookings(&[(s2, e2)]), "court-1", day(), clock(s1), clock(e1)).unwrap();
        prop_assert_eq!(a_vs_b, b_vs_a);
    }
}

// ---------------------------------------------------------------------------
// Property 3: evaluate is deterministic
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn evaluate_is_idempotent(
        (open, close) in arb_hours(),
        booked in arb_bookings(),
        start in arb_start(),
        duration in arb_duration(),
        now in arb_now(),
    ) {
        let c = court(open, close);
        let existing = bookings(&booked);
        let req = request(start, duration);

        let first = evaluate(&c, &existing, &req, now);
        let second = evaluate(&c, &existing, &req, now);
        prop_assert_eq!(first, second);
    }
}

// ---------------------------------------------------------------------------
// Property 4: accepted requests never overlap a booking and stay in hours
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn accepted_requests_are_consistent(
        (open, close) in arb_hours(),
        booked in arb_bookings(),
        start in arb_start(),
        duration in arb_duration(),
        now in arb_now(),
    ) {
        let c = court(open, close);
        let existing = bookings(&booked);
        let req = request(start, duration);

        if let Ok(eligible) = evaluate(&c, &existing, &req, now) {
            let end = start + duration;
            prop_assert!(start >= open && end <= close, "{}–{} outside {}–{}", start, end, open, close);
            prop_assert!(eligible.interval.start >= now);
            for &(s, e) in &booked {
                prop_assert!(!(s < end && start < e), "overlaps booking {}–{}", s, e);
            }
            prop_assert_eq!(eligible.interval.duration_minutes(), i64::from(duration));
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: past requests are always PastDate
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn past_requests_rejected_as_past(
        (open, close) in arb_hours(),
        booked in arb_bookings(),
        start in arb_start(),
        duration in arb_duration(),
    ) {
        let c = court(open, close);
        let existing = bookings(&booked);
        let now = day().succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap();

        prop_assert_eq!(
            evaluate(&c, &existing, &request(start, duration), now),
            Err(Rejection::PastDate)
        );
    }
}

// ---------------------------------------------------------------------------
// Property 6: every available slot round-trips through evaluate
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn available_slots_round_trip(
        (open, close) in arb_hours(),
        booked in arb_bookings(),
        granularity in arb_duration(),
        now in arb_now(),
    ) {
        let c = court(open, close);
        let existing = bookings(&booked);
        let grid = enumerate_slots(&c, &existing, day(), granularity, now).unwrap();

        for slot in grid.iter().filter(|s| s.status == SlotStatus::Available) {
            let req = request(slot.start.minutes(), granularity);
            prop_assert!(
                evaluate(&c, &existing, &req, now).is_ok(),
                "available slot {} rejected: {:?}",
                slot.start,
                evaluate(&c, &existing, &req, now)
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 7: grids are contiguous, ascending and restartable
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn grid_is_ordered_and_restartable(
        (open, close) in arb_hours(),
        booked in arb_bookings(),
        granularity in 1u32..=180,
        now in arb_now(),
    ) {
        let c = court(open, close);
        let existing = bookings(&booked);
        let grid = enumerate_slots(&c, &existing, day(), granularity, now).unwrap();

        let slots: Vec<_> = grid.iter().collect();
        prop_assert_eq!(slots.len(), ((close - open) / granularity) as usize);
        for pair in slots.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
            prop_assert!(pair[0].start < pair[1].start);
        }
        let again: Vec<_> = grid.iter().collect();
        prop_assert_eq!(slots, again);
    }
}
