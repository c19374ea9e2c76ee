//! Transport configuration: truck and driver specifications.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Truck-specific configuration values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckSpecification {
    /// Fuel consumption in L/km with no load.
    pub fuel_consumption_empty: f64,
    /// Fuel consumption in L/km when loaded.
    pub fuel_consumption_loaded: f64,
    pub toll_class: String,
    pub euro_class: String,
    pub co2_class: String,
    pub maintenance_rate_per_km: Decimal,
}

/// Driver-specific configuration values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverSpecification {
    /// Base daily rate.
    pub daily_rate: Decimal,
    /// Hourly rate for driving time.
    pub driving_time_rate: Decimal,
    /// Multiplier applied to the time rate for overtime hours.
    pub overtime_rate_multiplier: Decimal,
    /// Maximum regular driving hours per day.
    pub max_driving_hours: u32,
    pub required_license_type: String,
    pub required_certifications: Vec<String>,
}

/// Runtime transport instance bound to a business entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transport {
    pub id: Uuid,
    pub transport_type_id: String,
    pub business_entity_id: Uuid,
    pub truck_specs: TruckSpecification,
    pub driver_specs: DriverSpecification,
    pub is_active: bool,
}
