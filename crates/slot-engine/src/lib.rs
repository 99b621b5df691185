//! # slot-engine
//!
//! Deterministic slot availability and booking eligibility for courts and coaches.
//!
//! Given a resource's opening schedule, its existing bookings and a candidate
//! request, the engine decides whether the request can be booked and builds the
//! free/booked slot grid shown to players. Every function is pure: inputs are
//! borrowed and never modified, and "now" is always passed in by the caller.
//!
//! The engine is an advisory pre-check. The backend that stores bookings must
//! re-validate on write, since two clients can race for the same slot.
//!
//! ## Modules
//!
//! - [`clock`]: `HH:MM` times of day (up to `24:00`) and local "now" resolution
//! - [`interval`]: Half-open `[start, end)` ranges
//! - [`schedule`]: Daily/weekly opening rules, window normalisation, pricing
//! - [`resource`]: The `Resource` trait with `Court` and `Coach`
//! - [`booking`]: Bookings, requests and accepted results
//! - [`conflict`]: Overlap checks and double-booking audit
//! - [`eligibility`]: `evaluate` a single request
//! - [`slots`]: Lazy, restartable slot grids for a day
//! - [`freebusy`]: Free windows and the first available start
//! - [`catalog`]: Catalog loading, browse filters, pagination
//! - [`error`]: Rejection reasons and input errors

pub mod booking;
pub mod catalog;
pub mod clock;
pub mod conflict;
pub mod eligibility;
pub mod error;
pub mod freebusy;
pub mod interval;
pub mod resource;
pub mod schedule;
pub mod slots;

pub use booking::{Booking, BookingEligible, SlotRequest};
pub use catalog::{paginate, AvailabilityFilter, BrowseQuery, Catalog, Page};
pub use clock::{local_now, ClockTime};
pub use conflict::{conflicts_with, find_double_bookings, has_conflict, Conflict};
pub use eligibility::evaluate;
pub use error::{EngineError, Rejection};
pub use freebusy::{first_available, free_windows, FreeWindow};
pub use interval::Interval;
pub use resource::{Coach, Court, Resource, ResourceStatus};
pub use schedule::{is_within_operating_hours, Schedule, ScheduleRule, Window};
pub use slots::{enumerate_slots, Slot, SlotGrid, SlotStatus};
