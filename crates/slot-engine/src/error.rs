//! Error types for slot-engine operations.
//!
//! [`Rejection`] is the normal outcome of a request that cannot be booked. It is
//! returned as a value and is never a bug. [`EngineError`] covers input that could
//! not be decoded at all (bad clock strings, unknown timezones, broken JSON).

use serde::Serialize;
use thiserror::Error;

use crate::resource::ResourceStatus;

/// Why a booking request (or a time range) was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum Rejection {
    /// The range is empty or inverted (`end <= start`).
    #[error("Invalid range: end must be after start")]
    InvalidRange,

    /// The requested duration is not one the resource offers.
    #[error("Unsupported duration: {minutes} minutes")]
    InvalidDuration { minutes: u32 },

    /// The resource is closed or under maintenance.
    #[error("Resource unavailable: {status}")]
    ResourceUnavailable { status: ResourceStatus },

    /// The range is not fully inside any operating window.
    #[error("Outside operating hours")]
    OutsideOperatingHours,

    /// The requested start lies before the supplied "now".
    #[error("Requested time is in the past")]
    PastDate,

    /// The range overlaps an existing booking.
    #[error("Slot conflicts with an existing booking")]
    SlotConflict,

    /// The request names a different resource than the one evaluated.
    #[error("Request is for resource '{found}', not '{expected}'")]
    ResourceMismatch { expected: String, found: String },
}

/// Errors raised while decoding engine inputs.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for engine computations that may be rejected.
pub type Result<T> = std::result::Result<T, Rejection>;
