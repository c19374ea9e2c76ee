//! Offer aggregate: priced quote over a cost breakdown.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LoadQuoteError, Result};
use crate::types::cargo::StatusTrigger;

/// Offer lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    Draft,
    Finalized,
    Completed,
    Cancelled,
}

impl OfferStatus {
    pub const ALL: [OfferStatus; 4] = [
        OfferStatus::Draft,
        OfferStatus::Finalized,
        OfferStatus::Completed,
        OfferStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Draft => "draft",
            OfferStatus::Finalized => "finalized",
            OfferStatus::Completed => "completed",
            OfferStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OfferStatus {
    type Err = LoadQuoteError;

    fn from_str(s: &str) -> Result<Self> {
        OfferStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| LoadQuoteError::Validation(format!("Unknown offer status: {s}")))
    }
}

/// A priced transport offer, created from a cost breakdown snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: Uuid,
    pub route_id: Uuid,
    pub cost_breakdown_id: Uuid,
    /// Markup over total cost; `final_price = total_cost * (1 + margin/100)`.
    pub margin_percentage: Decimal,
    pub final_price: Decimal,
    pub ai_content: Option<String>,
    pub fun_fact: Option<String>,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
    pub finalized_at: Option<DateTime<Utc>>,
}

/// Audit entry written for every offer status transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferStatusEvent {
    pub id: Uuid,
    pub offer_id: Uuid,
    pub old_status: OfferStatus,
    pub new_status: OfferStatus,
    pub trigger: StatusTrigger,
    pub comment: Option<String>,
    pub timestamp: DateTime<Utc>,
}
