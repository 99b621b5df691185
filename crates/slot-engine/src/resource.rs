//! Bookable resources: courts and coaches.
//!
//! The engine only needs a schedule, a status and the durations on offer, so it
//! talks to both variants through the [`Resource`] trait and never checks which
//! one it holds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schedule::Schedule;

/// Whether a resource accepts bookings at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    #[default]
    Open,
    Closed,
    Maintenance,
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceStatus::Open => "open",
            ResourceStatus::Closed => "closed",
            ResourceStatus::Maintenance => "maintenance",
        };
        f.write_str(s)
    }
}

/// What the availability engine needs to know about a bookable thing.
pub trait Resource {
    fn id(&self) -> &str;
    fn schedule(&self) -> &Schedule;
    fn status(&self) -> ResourceStatus;
    /// Booking lengths on offer, in minutes.
    fn supported_durations(&self) -> &[u32];
}

fn default_durations() -> Vec<u32> {
    vec![60, 90, 120]
}

/// A court at a sports facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Court {
    pub id: String,
    pub name: String,
    /// e.g. "tennis", "badminton", "futsal"
    pub sport: String,
    #[serde(default)]
    pub location: Option<String>,
    pub schedule: Schedule,
    #[serde(default)]
    pub status: ResourceStatus,
    #[serde(default = "default_durations")]
    pub durations: Vec<u32>,
}

/// A coach offering sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coach {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sports: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub schedule: Schedule,
    #[serde(default)]
    pub status: ResourceStatus,
    #[serde(default = "default_durations")]
    pub session_durations: Vec<u32>,
}

impl Resource for Court {
    fn id(&self) -> &str {
        &self.id
    }

    fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    fn status(&self) -> ResourceStatus {
        self.status
    }

    fn supported_durations(&self) -> &[u32] {
        &self.durations
    }
}

impl Resource for Coach {
    fn id(&self) -> &str {
        &self.id
    }

    fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    fn status(&self) -> ResourceStatus {
        self.status
    }

    fn supported_durations(&self) -> &[u32] {
        &self.session_durations
    }
}
