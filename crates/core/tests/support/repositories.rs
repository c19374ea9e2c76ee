//! In-memory mock implementations of the core ports.
//!
//! All mocks are cheaply cloneable handles over shared state, so a test can
//! keep a handle for assertions while the service owns another.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use loadquote_core::cargo::ports::CargoRepository;
use loadquote_core::costing::ports::{
    BusinessRepository, CostBreakdownRepository, EmptyDrivingRepository, RouteRepository,
    TollCalculator, TollOverrides, TruckTollSpecs,
};
use loadquote_core::offers::ports::{ContentEnhancer, EnhancedContent, OfferRepository};
use loadquote_core::rates::ports::RateScheduleRepository;
use loadquote_core::settings::ports::{CostSettingsRepository, FuelRateSource};
use loadquote_domain::types::rates::{RateType, RateValidationSchema};
use loadquote_domain::{
    BusinessEntity, Cargo, CargoStatusHistoryEntry, CostBreakdown, CostSettings,
    CountrySegment, EmptyDriving, LoadQuoteError, Offer, OfferStatusEvent, Result, Route,
    Transport,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// In-memory `RouteRepository`. `fail_on_save(n)` makes the n-th save call
/// fail, for exercising saga compensation and rollback-failure paths.
#[derive(Default, Clone)]
pub struct MockRouteRepository {
    routes: Arc<Mutex<BTreeMap<Uuid, Route>>>,
    saves: Arc<AtomicU64>,
    fail_on_save: Arc<Mutex<Option<u64>>>,
}

impl MockRouteRepository {
    pub fn with_route(self, route: Route) -> Self {
        self.routes.lock().unwrap().insert(route.id, route);
        self
    }

    /// Make the n-th save (1-based) fail.
    pub fn fail_on_save(&self, n: u64) {
        *self.fail_on_save.lock().unwrap() = Some(n);
    }

    pub fn get(&self, id: Uuid) -> Option<Route> {
        self.routes.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl RouteRepository for MockRouteRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Route>> {
        Ok(self.routes.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_cargo_id(&self, cargo_id: Uuid) -> Result<Option<Route>> {
        Ok(self
            .routes
            .lock()
            .unwrap()
            .values()
            .find(|route| route.cargo_id == Some(cargo_id))
            .cloned())
    }

    async fn save(&self, route: Route) -> Result<Route> {
        let call = self.saves.fetch_add(1, Ordering::SeqCst) + 1;
        if *self.fail_on_save.lock().unwrap() == Some(call) {
            return Err(LoadQuoteError::Database("simulated route save failure".into()));
        }
        self.routes.lock().unwrap().insert(route.id, route.clone());
        Ok(route)
    }
}

#[derive(Default, Clone)]
pub struct MockTransportRepository {
    transports: Arc<Mutex<BTreeMap<Uuid, Transport>>>,
}

impl MockTransportRepository {
    pub fn with_transport(self, transport: Transport) -> Self {
        self.transports.lock().unwrap().insert(transport.id, transport);
        self
    }
}

#[async_trait]
impl loadquote_core::costing::ports::TransportRepository for MockTransportRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transport>> {
        Ok(self.transports.lock().unwrap().get(&id).cloned())
    }
}

#[derive(Default, Clone)]
pub struct MockBusinessRepository {
    businesses: Arc<Mutex<BTreeMap<Uuid, BusinessEntity>>>,
}

impl MockBusinessRepository {
    pub fn with_business(self, business: BusinessEntity) -> Self {
        self.businesses.lock().unwrap().insert(business.id, business);
        self
    }
}

#[async_trait]
impl BusinessRepository for MockBusinessRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BusinessEntity>> {
        Ok(self.businesses.lock().unwrap().get(&id).cloned())
    }
}

#[derive(Default, Clone)]
pub struct MockEmptyDrivingRepository {
    records: Arc<Mutex<BTreeMap<Uuid, EmptyDriving>>>,
}

impl MockEmptyDrivingRepository {
    pub fn with_record(self, record: EmptyDriving) -> Self {
        self.records.lock().unwrap().insert(record.id, record);
        self
    }
}

#[async_trait]
impl EmptyDrivingRepository for MockEmptyDrivingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<EmptyDriving>> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }
}

/// In-memory `CostSettingsRepository`, keyed by route id.
#[derive(Default, Clone)]
pub struct MockCostSettingsRepository {
    settings: Arc<Mutex<BTreeMap<Uuid, CostSettings>>>,
}

impl MockCostSettingsRepository {
    pub fn with_settings(self, settings: CostSettings) -> Self {
        self.settings.lock().unwrap().insert(settings.route_id, settings);
        self
    }
}

#[async_trait]
impl CostSettingsRepository for MockCostSettingsRepository {
    async fn save(&self, settings: CostSettings) -> Result<CostSettings> {
        self.settings.lock().unwrap().insert(settings.route_id, settings.clone());
        Ok(settings)
    }

    async fn find_by_route_id(&self, route_id: Uuid) -> Result<Option<CostSettings>> {
        Ok(self.settings.lock().unwrap().get(&route_id).cloned())
    }
}

/// In-memory `CostBreakdownRepository`; saving overwrites per route.
#[derive(Default, Clone)]
pub struct MockCostBreakdownRepository {
    breakdowns: Arc<Mutex<BTreeMap<Uuid, CostBreakdown>>>,
}

#[async_trait]
impl CostBreakdownRepository for MockCostBreakdownRepository {
    async fn save(&self, breakdown: CostBreakdown) -> Result<CostBreakdown> {
        self.breakdowns.lock().unwrap().insert(breakdown.route_id, breakdown.clone());
        Ok(breakdown)
    }

    async fn find_by_route_id(&self, route_id: Uuid) -> Result<Option<CostBreakdown>> {
        Ok(self.breakdowns.lock().unwrap().get(&route_id).cloned())
    }
}

/// In-memory `CargoRepository` with an append-only history log.
#[derive(Default, Clone)]
pub struct MockCargoRepository {
    cargo: Arc<Mutex<BTreeMap<Uuid, Cargo>>>,
    history: Arc<Mutex<Vec<CargoStatusHistoryEntry>>>,
}

impl MockCargoRepository {
    pub fn with_cargo(self, cargo: Cargo) -> Self {
        self.cargo.lock().unwrap().insert(cargo.id, cargo);
        self
    }

    pub fn get(&self, id: Uuid) -> Option<Cargo> {
        self.cargo.lock().unwrap().get(&id).cloned()
    }

    pub fn history_entries(&self, cargo_id: Uuid) -> Vec<CargoStatusHistoryEntry> {
        self.history
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.cargo_id == cargo_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CargoRepository for MockCargoRepository {
    async fn save(&self, cargo: Cargo) -> Result<Cargo> {
        self.cargo.lock().unwrap().insert(cargo.id, cargo.clone());
        Ok(cargo)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Cargo>> {
        Ok(self.cargo.lock().unwrap().get(&id).cloned())
    }

    async fn append_status_history(&self, entry: CargoStatusHistoryEntry) -> Result<()> {
        self.history.lock().unwrap().push(entry);
        Ok(())
    }

    async fn status_history(&self, cargo_id: Uuid) -> Result<Vec<CargoStatusHistoryEntry>> {
        let mut entries = self.history_entries(cargo_id);
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Cargo>> {
        let mut items: Vec<Cargo> = self
            .cargo
            .lock()
            .unwrap()
            .values()
            .filter(|cargo| cargo.is_active)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items.into_iter().skip(offset as usize).take(limit as usize).collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.cargo.lock().unwrap().values().filter(|cargo| cargo.is_active).count()
            as u64)
    }
}

/// In-memory `OfferRepository`. `fail_next_save` makes the next save fail,
/// for exercising saga compensation after the route has advanced.
#[derive(Default, Clone)]
pub struct MockOfferRepository {
    offers: Arc<Mutex<BTreeMap<Uuid, Offer>>>,
    events: Arc<Mutex<Vec<OfferStatusEvent>>>,
    fail_next_save: Arc<AtomicBool>,
}

impl MockOfferRepository {
    pub fn with_offer(self, offer: Offer) -> Self {
        self.offers.lock().unwrap().insert(offer.id, offer);
        self
    }

    pub fn fail_next_save(&self) {
        self.fail_next_save.store(true, Ordering::SeqCst);
    }

    pub fn get(&self, id: Uuid) -> Option<Offer> {
        self.offers.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl OfferRepository for MockOfferRepository {
    async fn save(&self, offer: Offer) -> Result<Offer> {
        if self.fail_next_save.swap(false, Ordering::SeqCst) {
            return Err(LoadQuoteError::Database("simulated offer save failure".into()));
        }
        self.offers.lock().unwrap().insert(offer.id, offer.clone());
        Ok(offer)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>> {
        Ok(self.offers.lock().unwrap().get(&id).cloned())
    }

    async fn append_status_event(&self, event: OfferStatusEvent) -> Result<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }

    async fn status_history(&self, offer_id: Uuid) -> Result<Vec<OfferStatusEvent>> {
        let mut entries: Vec<OfferStatusEvent> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.offer_id == offer_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }
}

/// In-memory `RateScheduleRepository` for schema overrides.
#[derive(Default, Clone)]
pub struct MockRateScheduleRepository {
    schemas: Arc<Mutex<BTreeMap<RateType, RateValidationSchema>>>,
}

#[async_trait]
impl RateScheduleRepository for MockRateScheduleRepository {
    async fn find_schema(&self, rate_type: RateType) -> Result<Option<RateValidationSchema>> {
        Ok(self.schemas.lock().unwrap().get(&rate_type).cloned())
    }

    async fn save_schema(&self, schema: RateValidationSchema) -> Result<()> {
        self.schemas.lock().unwrap().insert(schema.rate_type, schema);
        Ok(())
    }
}

/// Fuel rates by country with a flat fallback for unknown countries.
#[derive(Clone)]
pub struct MockFuelRateSource {
    rates: Arc<BTreeMap<String, Decimal>>,
    fallback: Decimal,
}

impl Default for MockFuelRateSource {
    fn default() -> Self {
        let mut rates = BTreeMap::new();
        rates.insert("DE".to_string(), dec!(1.85));
        rates.insert("FR".to_string(), dec!(1.82));
        rates.insert("PL".to_string(), dec!(1.65));
        Self { rates: Arc::new(rates), fallback: dec!(1.60) }
    }
}

#[async_trait]
impl FuelRateSource for MockFuelRateSource {
    async fn fuel_rate(&self, country_code: &str) -> Result<Decimal> {
        Ok(self.rates.get(country_code).copied().unwrap_or(self.fallback))
    }
}

/// Toll cost as a fixed per-km rate, ignoring truck class.
#[derive(Clone)]
pub struct MockTollCalculator {
    rate_per_km: Decimal,
}

impl MockTollCalculator {
    pub fn new(rate_per_km: Decimal) -> Self {
        Self { rate_per_km }
    }
}

impl Default for MockTollCalculator {
    fn default() -> Self {
        Self::new(dec!(0.20))
    }
}

#[async_trait]
impl TollCalculator for MockTollCalculator {
    async fn calculate_toll(
        &self,
        segment: &CountrySegment,
        _truck_specs: &TruckTollSpecs,
        _business_id: Option<Uuid>,
        _overrides: Option<&TollOverrides>,
    ) -> Result<Decimal> {
        Ok(loadquote_domain::decimal_from_f64(segment.distance_km)? * self.rate_per_km)
    }
}

/// Content enhancer returning canned text.
#[derive(Default, Clone)]
pub struct MockContentEnhancer;

#[async_trait]
impl ContentEnhancer for MockContentEnhancer {
    async fn enhance_offer(&self, offer: &Offer) -> Result<EnhancedContent> {
        Ok(EnhancedContent {
            content: format!("Transport offer priced at {}", offer.final_price),
            fun_fact: "A modern truck engine outlives three gearboxes.".to_string(),
        })
    }
}

/// Content enhancer that always fails, for surfacing collaborator errors.
#[derive(Default, Clone)]
pub struct FailingContentEnhancer;

#[async_trait]
impl ContentEnhancer for FailingContentEnhancer {
    async fn enhance_offer(&self, _offer: &Offer) -> Result<EnhancedContent> {
        Err(LoadQuoteError::ExternalService("content service unavailable".into()))
    }
}
