//! Cargo aggregate and its status-history log.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LoadQuoteError, Result};

/// Cargo lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CargoStatus {
    Pending,
    InTransit,
    Delivered,
    Cancelled,
}

impl CargoStatus {
    pub const ALL: [CargoStatus; 4] = [
        CargoStatus::Pending,
        CargoStatus::InTransit,
        CargoStatus::Delivered,
        CargoStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CargoStatus::Pending => "pending",
            CargoStatus::InTransit => "in_transit",
            CargoStatus::Delivered => "delivered",
            CargoStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for CargoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CargoStatus {
    type Err = LoadQuoteError;

    fn from_str(s: &str) -> Result<Self> {
        CargoStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| LoadQuoteError::Validation(format!("Unknown cargo status: {s}")))
    }
}

/// What caused a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTrigger {
    ManualUpdate,
    OfferFinalization,
}

impl StatusTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTrigger::ManualUpdate => "manual_update",
            StatusTrigger::OfferFinalization => "offer_finalization",
        }
    }
}

impl fmt::Display for StatusTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusTrigger {
    type Err = LoadQuoteError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "manual_update" => Ok(StatusTrigger::ManualUpdate),
            "offer_finalization" => Ok(StatusTrigger::OfferFinalization),
            other => Err(LoadQuoteError::Validation(format!("Unknown status trigger: {other}"))),
        }
    }
}

/// Cargo being transported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cargo {
    pub id: Uuid,
    pub business_entity_id: Option<Uuid>,
    /// Weight in kg.
    pub weight: f64,
    /// Volume in cubic meters.
    pub volume: f64,
    pub cargo_type: String,
    pub value: Decimal,
    pub special_requirements: Vec<String>,
    pub status: CargoStatus,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One entry of the cargo status-history log.
///
/// History entries are append-only; saga compensation does not remove them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoStatusHistoryEntry {
    pub id: Uuid,
    pub cargo_id: Uuid,
    pub old_status: CargoStatus,
    pub new_status: CargoStatus,
    pub trigger: StatusTrigger,
    pub trigger_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}
