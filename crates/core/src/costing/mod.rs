//! Cost calculation engine - fuel, toll, driver, overhead and event costs.
//!
//! All currency math happens in `rust_decimal::Decimal`; physical
//! measurements cross the money boundary through a checked conversion.

pub mod ports;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use loadquote_domain::constants::{default_event_rate, DEFAULT_FUEL_RATE};
use loadquote_domain::types::rates::RateType;
use loadquote_domain::{
    decimal_from_f64, BusinessEntity, CostBreakdown, CostComponent, CostSettings,
    DriverCostBreakdown, EmptyDriving, LoadQuoteError, Result, Route, Transport,
};
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::settings::ports::CostSettingsRepository;
use ports::{
    BusinessRepository, CostBreakdownRepository, EmptyDrivingRepository, RouteRepository,
    TollCalculator, TransportRepository, TruckTollSpecs,
};

/// The multi-component cost calculation engine.
pub struct CostCalculationService {
    settings_repo: Arc<dyn CostSettingsRepository>,
    breakdown_repo: Arc<dyn CostBreakdownRepository>,
    empty_driving_repo: Arc<dyn EmptyDrivingRepository>,
    toll_calculator: Arc<dyn TollCalculator>,
    route_repo: Arc<dyn RouteRepository>,
    transport_repo: Arc<dyn TransportRepository>,
    business_repo: Arc<dyn BusinessRepository>,
}

impl CostCalculationService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        settings_repo: Arc<dyn CostSettingsRepository>,
        breakdown_repo: Arc<dyn CostBreakdownRepository>,
        empty_driving_repo: Arc<dyn EmptyDrivingRepository>,
        toll_calculator: Arc<dyn TollCalculator>,
        route_repo: Arc<dyn RouteRepository>,
        transport_repo: Arc<dyn TransportRepository>,
        business_repo: Arc<dyn BusinessRepository>,
    ) -> Self {
        Self {
            settings_repo,
            breakdown_repo,
            empty_driving_repo,
            toll_calculator,
            route_repo,
            transport_repo,
            business_repo,
        }
    }

    /// Compute and persist the complete cost breakdown for a route.
    ///
    /// Fails immediately on a country-coverage violation or any missing
    /// referenced entity; nothing is retried.
    pub async fn calculate_costs(
        &self,
        route: &Route,
        transport: &Transport,
        business: &BusinessEntity,
    ) -> Result<CostBreakdown> {
        self.check_country_coverage(route, business)?;

        let settings = self
            .settings_repo
            .find_by_route_id(route.id)
            .await?
            .ok_or_else(|| LoadQuoteError::not_found("cost settings for route", route.id))?;
        let empty_driving = self
            .empty_driving_repo
            .find_by_id(route.empty_driving_id)
            .await?
            .ok_or_else(|| {
                LoadQuoteError::not_found("empty driving record", route.empty_driving_id)
            })?;

        let fuel_costs = self.fuel_costs(route, transport, &settings, &empty_driving)?;
        let toll_costs = self.toll_costs(route, transport, business, &settings).await?;
        let driver_costs = self.driver_costs(route, transport, &settings)?;
        let overhead_costs = overhead_costs(business, &settings);
        let timeline_event_costs = event_costs(route, &settings);

        let total_cost = fuel_costs.values().sum::<Decimal>()
            + toll_costs.values().sum::<Decimal>()
            + driver_costs.total_cost
            + overhead_costs
            + timeline_event_costs.values().sum::<Decimal>();

        let breakdown = CostBreakdown {
            id: Uuid::new_v4(),
            route_id: route.id,
            fuel_costs,
            toll_costs,
            driver_costs,
            overhead_costs,
            timeline_event_costs,
            total_cost,
        };

        info!(route_id = %route.id, total_cost = %breakdown.total_cost, "calculated costs");
        self.breakdown_repo.save(breakdown).await
    }

    /// Resolve route, transport and business by id, then calculate.
    pub async fn calculate_and_save_costs(&self, route_id: Uuid) -> Result<CostBreakdown> {
        let route = self
            .route_repo
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| LoadQuoteError::not_found("route", route_id))?;
        let transport = self
            .transport_repo
            .find_by_id(route.transport_id)
            .await?
            .ok_or_else(|| LoadQuoteError::not_found("transport", route.transport_id))?;
        let business = self
            .business_repo
            .find_by_id(route.business_entity_id)
            .await?
            .ok_or_else(|| {
                LoadQuoteError::not_found("business entity", route.business_entity_id)
            })?;

        self.calculate_costs(&route, &transport, &business).await
    }

    /// Latest persisted breakdown for a route.
    pub async fn get_cost_breakdown(&self, route_id: Uuid) -> Result<CostBreakdown> {
        self.breakdown_repo
            .find_by_route_id(route_id)
            .await?
            .ok_or_else(|| LoadQuoteError::not_found("cost breakdown for route", route_id))
    }

    /// Every country the route touches must be within the business's
    /// operating footprint.
    fn check_country_coverage(&self, route: &Route, business: &BusinessEntity) -> Result<()> {
        let missing: BTreeSet<&str> = route
            .country_segments
            .iter()
            .map(|segment| segment.country_code.as_str())
            .filter(|country| !business.operates_in(country))
            .collect();

        if missing.is_empty() {
            return Ok(());
        }
        let names: Vec<&str> = missing.into_iter().collect();
        Err(LoadQuoteError::Validation(format!(
            "business does not operate in countries: {}",
            names.join(", ")
        )))
    }

    fn fuel_costs(
        &self,
        route: &Route,
        transport: &Transport,
        settings: &CostSettings,
        empty_driving: &EmptyDriving,
    ) -> Result<BTreeMap<String, Decimal>> {
        if !settings.is_enabled(CostComponent::Fuel) {
            return Ok(zero_per_country(route));
        }

        let fuel_rate =
            settings.rate(RateType::FuelRate.as_str()).unwrap_or(DEFAULT_FUEL_RATE);
        let mut costs = BTreeMap::new();

        for segment in &route.country_segments {
            let consumption =
                transport.truck_specs.fuel_consumption_loaded * segment.distance_km;
            costs.insert(
                segment.country_code.clone(),
                decimal_from_f64(consumption)? * fuel_rate,
            );
        }

        // The unloaded leg is booked entirely against the first segment's
        // country (lowest segment order).
        if let Some(first) = route.first_segment() {
            let empty_consumption =
                transport.truck_specs.fuel_consumption_empty * empty_driving.distance_km;
            let empty_cost = decimal_from_f64(empty_consumption)? * fuel_rate;
            if let Some(entry) = costs.get_mut(&first.country_code) {
                *entry += empty_cost;
            }
        }

        Ok(costs)
    }

    async fn toll_costs(
        &self,
        route: &Route,
        transport: &Transport,
        business: &BusinessEntity,
        settings: &CostSettings,
    ) -> Result<BTreeMap<String, Decimal>> {
        if !settings.is_enabled(CostComponent::Toll) {
            return Ok(zero_per_country(route));
        }

        let truck_specs = TruckTollSpecs {
            toll_class: transport.truck_specs.toll_class.clone(),
            euro_class: transport.truck_specs.euro_class.clone(),
            co2_class: transport.truck_specs.co2_class.clone(),
        };

        let mut costs = BTreeMap::new();
        for segment in &route.country_segments {
            let toll = self
                .toll_calculator
                .calculate_toll(segment, &truck_specs, Some(business.id), None)
                .await?;
            debug!(country = %segment.country_code, %toll, "segment toll calculated");
            costs.insert(segment.country_code.clone(), toll);
        }

        Ok(costs)
    }

    fn driver_costs(
        &self,
        route: &Route,
        transport: &Transport,
        settings: &CostSettings,
    ) -> Result<DriverCostBreakdown> {
        if !settings.is_enabled(CostComponent::Driver) {
            return Ok(DriverCostBreakdown::zero());
        }

        let specs = &transport.driver_specs;
        let daily_rate =
            settings.rate(RateType::DriverBaseRate.as_str()).unwrap_or(specs.daily_rate);
        let time_rate = settings
            .rate(RateType::DriverTimeRate.as_str())
            .unwrap_or(specs.driving_time_rate);

        let total_hours = route.total_duration_hours;
        let days = (total_hours / 24.0).ceil().max(0.0) as u64;

        let base_cost = daily_rate * Decimal::from(days);

        let max_regular_hours = f64::from(specs.max_driving_hours) * days as f64;
        let regular_hours = total_hours.min(max_regular_hours);
        let overtime_hours = (total_hours - regular_hours).max(0.0);

        let regular_hours_cost = decimal_from_f64(regular_hours)? * time_rate;
        let overtime_cost =
            decimal_from_f64(overtime_hours)? * time_rate * specs.overtime_rate_multiplier;

        Ok(DriverCostBreakdown {
            base_cost,
            regular_hours_cost,
            overtime_cost,
            total_cost: base_cost + regular_hours_cost + overtime_cost,
        })
    }
}

fn zero_per_country(route: &Route) -> BTreeMap<String, Decimal> {
    route
        .country_segments
        .iter()
        .map(|segment| (segment.country_code.clone(), Decimal::ZERO))
        .collect()
}

fn overhead_costs(business: &BusinessEntity, settings: &CostSettings) -> Decimal {
    if !settings.is_enabled(CostComponent::Overhead) {
        return Decimal::ZERO;
    }
    // Flat sum; deliberately not prorated by distance or duration.
    business.cost_overheads.values().sum()
}

fn event_costs(route: &Route, settings: &CostSettings) -> BTreeMap<String, Decimal> {
    if !settings.is_enabled(CostComponent::Events) {
        return route
            .timeline_events
            .iter()
            .map(|event| (event.event_type.clone(), Decimal::ZERO))
            .collect();
    }

    let mut costs = BTreeMap::new();
    for event in &route.timeline_events {
        // Flat per-type amount; repeated types collapse into one entry.
        let rate = settings
            .rate(&format!("{}_rate", event.event_type))
            .unwrap_or_else(|| default_event_rate(&event.event_type));
        costs.insert(event.event_type.clone(), rate);
    }
    costs
}
