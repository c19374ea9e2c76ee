//! Rate types and their validation schemas.
//!
//! Every billable unit cost has a tagged rate type with numeric bounds kept
//! as data in one default table. Persisted overrides may replace individual
//! schemas; the built-in table is the fallback.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{LoadQuoteError, Result};

/// Fixed set of supported rate types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateType {
    FuelRate,
    FuelSurchargeRate,
    TollRate,
    TollRateMultiplier,
    DriverBaseRate,
    DriverTimeRate,
    DriverOvertimeRate,
    EventRate,
    PickupRate,
    DeliveryRate,
    RestRate,
    RefrigerationRate,
    OverheadAdminRate,
    OverheadInsuranceRate,
    OverheadFacilitiesRate,
    OverheadOtherRate,
}

impl RateType {
    pub const ALL: [RateType; 16] = [
        RateType::FuelRate,
        RateType::FuelSurchargeRate,
        RateType::TollRate,
        RateType::TollRateMultiplier,
        RateType::DriverBaseRate,
        RateType::DriverTimeRate,
        RateType::DriverOvertimeRate,
        RateType::EventRate,
        RateType::PickupRate,
        RateType::DeliveryRate,
        RateType::RestRate,
        RateType::RefrigerationRate,
        RateType::OverheadAdminRate,
        RateType::OverheadInsuranceRate,
        RateType::OverheadFacilitiesRate,
        RateType::OverheadOtherRate,
    ];

    /// Stable string identifier, used as the rates-map key and in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            RateType::FuelRate => "fuel_rate",
            RateType::FuelSurchargeRate => "fuel_surcharge_rate",
            RateType::TollRate => "toll_rate",
            RateType::TollRateMultiplier => "toll_rate_multiplier",
            RateType::DriverBaseRate => "driver_base_rate",
            RateType::DriverTimeRate => "driver_time_rate",
            RateType::DriverOvertimeRate => "driver_overtime_rate",
            RateType::EventRate => "event_rate",
            RateType::PickupRate => "pickup_rate",
            RateType::DeliveryRate => "delivery_rate",
            RateType::RestRate => "rest_rate",
            RateType::RefrigerationRate => "refrigeration_rate",
            RateType::OverheadAdminRate => "overhead_admin_rate",
            RateType::OverheadInsuranceRate => "overhead_insurance_rate",
            RateType::OverheadFacilitiesRate => "overhead_facilities_rate",
            RateType::OverheadOtherRate => "overhead_other_rate",
        }
    }
}

impl fmt::Display for RateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RateType {
    type Err = LoadQuoteError;

    fn from_str(s: &str) -> Result<Self> {
        RateType::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| LoadQuoteError::Validation(format!("Unknown rate type: {s}")))
    }
}

/// Validation rules for one rate type.
///
/// Invariant: `0 <= min_value <= max_value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateValidationSchema {
    pub rate_type: RateType,
    pub min_value: Decimal,
    pub max_value: Decimal,
    pub country_specific: bool,
    pub requires_certification: bool,
}

impl RateValidationSchema {
    pub fn new(
        rate_type: RateType,
        min_value: Decimal,
        max_value: Decimal,
        country_specific: bool,
        requires_certification: bool,
    ) -> Self {
        debug_assert!(min_value >= Decimal::ZERO && min_value <= max_value);
        Self { rate_type, min_value, max_value, country_specific, requires_certification }
    }
}

/// Validate a rate value against its schema.
///
/// True iff the schema actually describes `rate_type` and the value lies
/// within the inclusive bounds.
pub fn validate_rate(rate_type: RateType, value: Decimal, schema: &RateValidationSchema) -> bool {
    if schema.rate_type != rate_type {
        return false;
    }
    schema.min_value <= value && value <= schema.max_value
}

static DEFAULT_SCHEMAS: Lazy<BTreeMap<RateType, RateValidationSchema>> = Lazy::new(|| {
    let rows: [(RateType, Decimal, Decimal, bool, bool); 16] = [
        (RateType::FuelRate, dec!(0.5), dec!(5.0), true, false),
        (RateType::FuelSurchargeRate, dec!(0.01), dec!(0.5), true, false),
        (RateType::TollRate, dec!(0.1), dec!(2.0), true, false),
        (RateType::TollRateMultiplier, dec!(0.5), dec!(2.0), true, false),
        (RateType::DriverBaseRate, dec!(100.0), dec!(500.0), false, false),
        (RateType::DriverTimeRate, dec!(10.0), dec!(100.0), true, false),
        (RateType::DriverOvertimeRate, dec!(15.0), dec!(150.0), true, false),
        (RateType::EventRate, dec!(20.0), dec!(200.0), false, false),
        (RateType::PickupRate, dec!(20.0), dec!(200.0), false, false),
        (RateType::DeliveryRate, dec!(20.0), dec!(200.0), false, false),
        (RateType::RestRate, dec!(20.0), dec!(150.0), false, false),
        (RateType::RefrigerationRate, dec!(0.2), dec!(1.0), true, true),
        (RateType::OverheadAdminRate, dec!(0.01), dec!(1000.0), false, false),
        (RateType::OverheadInsuranceRate, dec!(0.01), dec!(1000.0), false, false),
        (RateType::OverheadFacilitiesRate, dec!(0.01), dec!(1000.0), false, false),
        (RateType::OverheadOtherRate, dec!(0.0), dec!(1000.0), false, false),
    ];

    rows.into_iter()
        .map(|(ty, min, max, country, cert)| {
            (ty, RateValidationSchema::new(ty, min, max, country, cert))
        })
        .collect()
});

/// Built-in validation schemas for every rate type.
pub fn default_validation_schemas() -> &'static BTreeMap<RateType, RateValidationSchema> {
    &DEFAULT_SCHEMAS
}
