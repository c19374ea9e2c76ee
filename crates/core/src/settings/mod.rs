//! Cost-settings management - creation with default filling, updates, cloning.

pub mod ports;

use std::collections::BTreeMap;
use std::sync::Arc;

use loadquote_domain::constants::{DEFAULT_EVENT_RATE, DEFAULT_TOLL_RATE_MULTIPLIER};
use loadquote_domain::types::rates::RateType;
use loadquote_domain::{
    BusinessEntity, CostComponent, CostSettings, CostSettingsDraft, CostSettingsUpdate,
    LoadQuoteError, Result, Route,
};
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::costing::ports::TransportRepository;
use crate::rates::RateCatalog;
use ports::{CostSettingsRepository, FuelRateSource};

/// Service managing per-route cost configuration.
pub struct CostSettingsService {
    settings_repo: Arc<dyn CostSettingsRepository>,
    transport_repo: Arc<dyn TransportRepository>,
    fuel_rates: Arc<dyn FuelRateSource>,
    catalog: RateCatalog,
}

impl CostSettingsService {
    pub fn new(
        settings_repo: Arc<dyn CostSettingsRepository>,
        transport_repo: Arc<dyn TransportRepository>,
        fuel_rates: Arc<dyn FuelRateSource>,
        catalog: RateCatalog,
    ) -> Self {
        Self { settings_repo, transport_repo, fuel_rates, catalog }
    }

    /// Create settings for a route, filling missing rates per enabled
    /// component before validating the complete map.
    pub async fn create_cost_settings(
        &self,
        route: &Route,
        draft: CostSettingsDraft,
        business: &BusinessEntity,
    ) -> Result<CostSettings> {
        if draft.enabled_components.is_empty() {
            return Err(LoadQuoteError::Validation(
                "at least one cost component must be enabled".into(),
            ));
        }

        let mut rates = draft.rates.clone();
        self.fill_default_rates(route, business, &draft, &mut rates).await?;
        self.validate(&rates).await?;

        let settings = CostSettings {
            id: Uuid::new_v4(),
            route_id: route.id,
            business_entity_id: business.id,
            enabled_components: draft.enabled_components,
            rates,
        };

        info!(route_id = %route.id, "creating cost settings");
        self.settings_repo.save(settings).await
    }

    /// Replace the components and rates of existing settings wholesale.
    pub async fn update_cost_settings(
        &self,
        route_id: Uuid,
        draft: CostSettingsDraft,
    ) -> Result<CostSettings> {
        if draft.enabled_components.is_empty() {
            return Err(LoadQuoteError::Validation(
                "at least one cost component must be enabled".into(),
            ));
        }

        let mut settings = self.require_settings(route_id).await?;
        settings.enabled_components = draft.enabled_components;
        settings.rates = draft.rates;
        self.validate(&settings.rates).await?;

        self.settings_repo.save(settings).await
    }

    /// Merge a partial update into stored settings; the merged rate set is
    /// validated before anything persists.
    pub async fn update_cost_settings_partial(
        &self,
        route_id: Uuid,
        update: CostSettingsUpdate,
    ) -> Result<CostSettings> {
        let mut settings = self.require_settings(route_id).await?;

        if let Some(components) = update.enabled_components {
            if components.is_empty() {
                return Err(LoadQuoteError::Validation(
                    "at least one cost component must be enabled".into(),
                ));
            }
            settings.enabled_components = components;
        }
        for (key, value) in update.rates {
            settings.rates.insert(key, value);
        }

        self.validate(&settings.rates).await?;
        self.settings_repo.save(settings).await
    }

    pub async fn get_cost_settings(&self, route_id: Uuid) -> Result<CostSettings> {
        self.require_settings(route_id).await
    }

    /// Clone settings from one route to another within the same business.
    ///
    /// Requires compatible transport types; optional rate modifications are
    /// applied on top of the cloned map and must be non-negative.
    pub async fn clone_cost_settings(
        &self,
        source_route: &Route,
        target_route: &Route,
        rate_modifications: Option<BTreeMap<String, Decimal>>,
    ) -> Result<CostSettings> {
        if source_route.business_entity_id != target_route.business_entity_id {
            return Err(LoadQuoteError::Validation(
                "source and target routes must belong to the same business entity".into(),
            ));
        }

        let source_transport = self.require_transport(source_route.transport_id).await?;
        let target_transport = self.require_transport(target_route.transport_id).await?;
        if source_transport.transport_type_id != target_transport.transport_type_id {
            return Err(LoadQuoteError::Validation(
                "source and target routes must have compatible transport types".into(),
            ));
        }

        let source = self.require_settings(source_route.id).await?;
        let mut rates = source.rates.clone();
        if let Some(modifications) = rate_modifications {
            for (key, value) in modifications {
                if value < Decimal::ZERO {
                    return Err(LoadQuoteError::Validation(format!(
                        "rate value for {key} cannot be negative"
                    )));
                }
                rates.insert(key, value);
            }
        }
        self.validate(&rates).await?;

        let settings = CostSettings {
            id: Uuid::new_v4(),
            route_id: target_route.id,
            business_entity_id: source.business_entity_id,
            enabled_components: source.enabled_components,
            rates,
        };

        info!(
            source_route_id = %source_route.id,
            target_route_id = %target_route.id,
            "cloning cost settings"
        );
        self.settings_repo.save(settings).await
    }

    async fn fill_default_rates(
        &self,
        route: &Route,
        business: &BusinessEntity,
        draft: &CostSettingsDraft,
        rates: &mut BTreeMap<String, Decimal>,
    ) -> Result<()> {
        let fuel_key = RateType::FuelRate.as_str();
        if draft.enabled_components.contains(&CostComponent::Fuel) && !rates.contains_key(fuel_key)
        {
            // A single fuel_rate key is kept for the whole route; with
            // several countries the last lookup wins.
            let mut seen = Vec::new();
            for segment in &route.country_segments {
                if seen.contains(&segment.country_code) {
                    continue;
                }
                seen.push(segment.country_code.clone());
                let rate = self.fuel_rates.fuel_rate(&segment.country_code).await?;
                debug!(country = %segment.country_code, %rate, "filled default fuel rate");
                rates.insert(fuel_key.to_string(), rate);
            }
        }

        if draft.enabled_components.contains(&CostComponent::Toll) {
            rates
                .entry(RateType::TollRateMultiplier.as_str().to_string())
                .or_insert(DEFAULT_TOLL_RATE_MULTIPLIER);
        }

        if draft.enabled_components.contains(&CostComponent::Driver) {
            let transport = self.require_transport(route.transport_id).await?;
            rates
                .entry(RateType::DriverBaseRate.as_str().to_string())
                .or_insert(transport.driver_specs.daily_rate);
            rates
                .entry(RateType::DriverTimeRate.as_str().to_string())
                .or_insert(transport.driver_specs.driving_time_rate);
        }

        if draft.enabled_components.contains(&CostComponent::Events) {
            rates
                .entry(RateType::EventRate.as_str().to_string())
                .or_insert(DEFAULT_EVENT_RATE);
        }

        if draft.enabled_components.contains(&CostComponent::Overhead) {
            for (category, value) in &business.cost_overheads {
                rates.entry(format!("overhead_{category}_rate")).or_insert(*value);
            }
        }

        Ok(())
    }

    async fn validate(&self, rates: &BTreeMap<String, Decimal>) -> Result<()> {
        let report = self.catalog.validate_rates(rates).await?;
        if !report.valid {
            return Err(LoadQuoteError::Validation(report.into_message()));
        }
        Ok(())
    }

    async fn require_settings(&self, route_id: Uuid) -> Result<CostSettings> {
        self.settings_repo
            .find_by_route_id(route_id)
            .await?
            .ok_or_else(|| LoadQuoteError::not_found("cost settings for route", route_id))
    }

    async fn require_transport(
        &self,
        transport_id: Uuid,
    ) -> Result<loadquote_domain::Transport> {
        self.transport_repo
            .find_by_id(transport_id)
            .await?
            .ok_or_else(|| LoadQuoteError::not_found("transport", transport_id))
    }
}
