//! Table-driven toll calculation.
//!
//! Per-country base rates are keyed by truck toll class (weight band) with an
//! emission-class adjustment on top. Countries without their own table fall
//! back to a region average (EU or other). Businesses may carry a rate
//! multiplier override keyed by country and vehicle class.

use async_trait::async_trait;
use loadquote_core::costing::ports::{TollCalculator, TollOverrides, TruckTollSpecs};
use loadquote_domain::{decimal_from_f64, CountrySegment, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;
use uuid::Uuid;

use super::is_eu_country;

/// Per-km base rate and emission adjustment for one rate table.
struct RateTable {
    toll_class: [(&'static str, Decimal); 4],
    euro_class: [(&'static str, Decimal); 4],
}

impl RateTable {
    /// Unknown toll classes price as the lightest band; unknown emission
    /// classes price as EURO III.
    fn per_km_rate(&self, toll_class: &str, euro_class: &str) -> Decimal {
        let base = lookup(&self.toll_class, toll_class).unwrap_or(self.toll_class[0].1);
        let adjustment = lookup(&self.euro_class, euro_class).unwrap_or(self.euro_class[3].1);
        base + adjustment
    }
}

fn lookup(entries: &[(&'static str, Decimal)], key: &str) -> Option<Decimal> {
    entries.iter().find(|(name, _)| *name == key).map(|(_, rate)| *rate)
}

const DE_RATES: RateTable = RateTable {
    toll_class: [
        ("1", dec!(0.187)),
        ("2", dec!(0.208)),
        ("3", dec!(0.228)),
        ("4", dec!(0.248)),
    ],
    euro_class: [
        ("VI", dec!(0.000)),
        ("V", dec!(0.021)),
        ("IV", dec!(0.042)),
        ("III", dec!(0.063)),
    ],
};

const FR_RATES: RateTable = RateTable {
    toll_class: [
        ("1", dec!(0.176)),
        ("2", dec!(0.196)),
        ("3", dec!(0.216)),
        ("4", dec!(0.236)),
    ],
    euro_class: [
        ("VI", dec!(0.000)),
        ("V", dec!(0.020)),
        ("IV", dec!(0.040)),
        ("III", dec!(0.060)),
    ],
};

const EU_RATES: RateTable = RateTable {
    toll_class: [
        ("1", dec!(0.177)),
        ("2", dec!(0.198)),
        ("3", dec!(0.218)),
        ("4", dec!(0.238)),
    ],
    euro_class: [
        ("VI", dec!(0.000)),
        ("V", dec!(0.020)),
        ("IV", dec!(0.041)),
        ("III", dec!(0.062)),
    ],
};

const OTHER_RATES: RateTable = RateTable {
    toll_class: [
        ("1", dec!(0.150)),
        ("2", dec!(0.170)),
        ("3", dec!(0.190)),
        ("4", dec!(0.210)),
    ],
    euro_class: [
        ("VI", dec!(0.000)),
        ("V", dec!(0.015)),
        ("IV", dec!(0.030)),
        ("III", dec!(0.045)),
    ],
};

fn table_for(country_code: &str) -> &'static RateTable {
    match country_code {
        "DE" => &DE_RATES,
        "FR" => &FR_RATES,
        _ if is_eu_country(country_code) => &EU_RATES,
        _ => &OTHER_RATES,
    }
}

/// Business-specific multiplier on the computed toll for one country and
/// vehicle class, optionally restricted to one route type.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessTollOverride {
    pub business_entity_id: Uuid,
    pub country_code: String,
    pub vehicle_class: String,
    pub route_type: Option<String>,
    pub rate_multiplier: Decimal,
}

impl BusinessTollOverride {
    fn applies(
        &self,
        business_id: Uuid,
        country_code: &str,
        vehicle_class: &str,
        route_type: Option<&str>,
    ) -> bool {
        if self.business_entity_id != business_id
            || self.country_code != country_code
            || self.vehicle_class != vehicle_class
        {
            return false;
        }
        match &self.route_type {
            Some(required) => route_type == Some(required.as_str()),
            None => true,
        }
    }
}

/// Toll calculator backed by the compiled rate tables plus configured
/// business overrides.
#[derive(Debug, Default, Clone)]
pub struct TableTollCalculator {
    overrides: Vec<BusinessTollOverride>,
}

impl TableTollCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, toll_override: BusinessTollOverride) -> Self {
        self.overrides.push(toll_override);
        self
    }

    fn multiplier_for(
        &self,
        business_id: Option<Uuid>,
        country_code: &str,
        vehicle_class: &str,
        route_type: Option<&str>,
    ) -> Decimal {
        let Some(business_id) = business_id else {
            return Decimal::ONE;
        };
        self.overrides
            .iter()
            .find(|o| o.applies(business_id, country_code, vehicle_class, route_type))
            .map(|o| o.rate_multiplier)
            .unwrap_or(Decimal::ONE)
    }
}

#[async_trait]
impl TollCalculator for TableTollCalculator {
    async fn calculate_toll(
        &self,
        segment: &CountrySegment,
        truck_specs: &TruckTollSpecs,
        business_id: Option<Uuid>,
        overrides: Option<&TollOverrides>,
    ) -> Result<Decimal> {
        let table = table_for(&segment.country_code);
        let per_km = table.per_km_rate(&truck_specs.toll_class, &truck_specs.euro_class);
        let distance = decimal_from_f64(segment.distance_km)?;

        let vehicle_class = overrides
            .and_then(|o| o.vehicle_class.as_deref())
            .unwrap_or(&truck_specs.toll_class);
        let route_type = overrides.and_then(|o| o.route_type.as_deref());
        let multiplier =
            self.multiplier_for(business_id, &segment.country_code, vehicle_class, route_type);

        let toll = per_km * distance * multiplier;
        debug!(
            country = %segment.country_code,
            distance_km = segment.distance_km,
            %per_km,
            %multiplier,
            %toll,
            "toll calculated"
        );
        Ok(toll)
    }
}
