//! Route aggregate: country segments, timeline events, empty driving.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LoadQuoteError, Result};

/// Route lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    Draft,
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl RouteStatus {
    pub const ALL: [RouteStatus; 5] = [
        RouteStatus::Draft,
        RouteStatus::Planned,
        RouteStatus::InProgress,
        RouteStatus::Completed,
        RouteStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStatus::Draft => "draft",
            RouteStatus::Planned => "planned",
            RouteStatus::InProgress => "in_progress",
            RouteStatus::Completed => "completed",
            RouteStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteStatus {
    type Err = LoadQuoteError;

    fn from_str(s: &str) -> Result<Self> {
        RouteStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| LoadQuoteError::Validation(format!("Unknown route status: {s}")))
    }
}

/// Timeline event lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEventStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TimelineEventStatus {
    pub const ALL: [TimelineEventStatus; 4] = [
        TimelineEventStatus::Pending,
        TimelineEventStatus::InProgress,
        TimelineEventStatus::Completed,
        TimelineEventStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimelineEventStatus::Pending => "pending",
            TimelineEventStatus::InProgress => "in_progress",
            TimelineEventStatus::Completed => "completed",
            TimelineEventStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TimelineEventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimelineEventStatus {
    type Err = LoadQuoteError;

    fn from_str(s: &str) -> Result<Self> {
        TimelineEventStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                LoadQuoteError::Validation(format!("Unknown timeline event status: {s}"))
            })
    }
}

/// Event in the route timeline (pickup / rest / delivery).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: Uuid,
    /// Event type identifier ("pickup", "delivery", "rest", ...).
    pub event_type: String,
    pub planned_time: DateTime<Utc>,
    pub duration_hours: f64,
    pub event_order: u32,
    pub status: TimelineEventStatus,
    pub actual_time: Option<DateTime<Utc>>,
}

/// Contiguous portion of a route within one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySegment {
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: String,
    pub distance_km: f64,
    pub duration_hours: f64,
    pub segment_order: u32,
}

/// Unloaded leg preceding pickup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmptyDriving {
    pub id: Uuid,
    pub distance_km: f64,
    pub duration_hours: f64,
}

/// Complete transport route with timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    pub transport_id: Uuid,
    pub business_entity_id: Uuid,
    pub cargo_id: Option<Uuid>,
    pub empty_driving_id: Uuid,
    pub timeline_events: Vec<TimelineEvent>,
    pub country_segments: Vec<CountrySegment>,
    pub total_distance_km: f64,
    pub total_duration_hours: f64,
    pub is_feasible: bool,
    pub status: RouteStatus,
}

impl Route {
    /// The segment with the lowest order; the empty-driving fuel cost is
    /// booked against this segment's country.
    pub fn first_segment(&self) -> Option<&CountrySegment> {
        self.country_segments.iter().min_by_key(|segment| segment.segment_order)
    }
}
