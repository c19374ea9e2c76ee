//! Cost configuration and calculation results.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LoadQuoteError, Result};

/// Togglable cost component groups, enabled per route.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CostComponent {
    Fuel,
    Toll,
    Driver,
    Events,
    Overhead,
}

impl CostComponent {
    pub const ALL: [CostComponent; 5] = [
        CostComponent::Fuel,
        CostComponent::Toll,
        CostComponent::Driver,
        CostComponent::Events,
        CostComponent::Overhead,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CostComponent::Fuel => "fuel",
            CostComponent::Toll => "toll",
            CostComponent::Driver => "driver",
            CostComponent::Events => "events",
            CostComponent::Overhead => "overhead",
        }
    }
}

impl fmt::Display for CostComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostComponent {
    type Err = LoadQuoteError;

    fn from_str(s: &str) -> Result<Self> {
        CostComponent::ALL
            .iter()
            .copied()
            .find(|component| component.as_str() == s)
            .ok_or_else(|| LoadQuoteError::Validation(format!("Unknown cost component: {s}")))
    }
}

/// Per-route cost configuration.
///
/// Invariant: every rate consumed by an enabled component is present and
/// within its schema's bounds (enforced by the settings service).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSettings {
    pub id: Uuid,
    pub route_id: Uuid,
    pub business_entity_id: Uuid,
    pub enabled_components: BTreeSet<CostComponent>,
    pub rates: BTreeMap<String, Decimal>,
}

impl CostSettings {
    pub fn is_enabled(&self, component: CostComponent) -> bool {
        self.enabled_components.contains(&component)
    }

    pub fn rate(&self, key: &str) -> Option<Decimal> {
        self.rates.get(key).copied()
    }
}

/// Requested settings before default filling and validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostSettingsDraft {
    pub enabled_components: BTreeSet<CostComponent>,
    pub rates: BTreeMap<String, Decimal>,
}

/// Partial update: absent fields keep their stored values, rates merge in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostSettingsUpdate {
    pub enabled_components: Option<BTreeSet<CostComponent>>,
    pub rates: BTreeMap<String, Decimal>,
}

/// Structured driver cost result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverCostBreakdown {
    pub base_cost: Decimal,
    pub regular_hours_cost: Decimal,
    pub overtime_cost: Decimal,
    pub total_cost: Decimal,
}

impl DriverCostBreakdown {
    pub fn zero() -> Self {
        Self {
            base_cost: Decimal::ZERO,
            regular_hours_cost: Decimal::ZERO,
            overtime_cost: Decimal::ZERO,
            total_cost: Decimal::ZERO,
        }
    }
}

/// Itemized, currency-exact cost result for one route.
///
/// Invariant: `total_cost` equals the exact decimal sum of all components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub id: Uuid,
    pub route_id: Uuid,
    /// Fuel costs keyed by country code.
    pub fuel_costs: BTreeMap<String, Decimal>,
    /// Toll costs keyed by country code.
    pub toll_costs: BTreeMap<String, Decimal>,
    pub driver_costs: DriverCostBreakdown,
    pub overhead_costs: Decimal,
    /// Event costs keyed by event type, not by event instance.
    pub timeline_event_costs: BTreeMap<String, Decimal>,
    pub total_cost: Decimal,
}

impl CostBreakdown {
    /// Exact decimal sum of every component; must equal `total_cost`.
    pub fn component_sum(&self) -> Decimal {
        self.fuel_costs.values().sum::<Decimal>()
            + self.toll_costs.values().sum::<Decimal>()
            + self.driver_costs.total_cost
            + self.overhead_costs
            + self.timeline_event_costs.values().sum::<Decimal>()
    }
}
