//! Port interfaces for cost calculation.
//!
//! These traits define the boundaries between the calculation engine and
//! infrastructure implementations (persistence and external collaborators).

use async_trait::async_trait;
use loadquote_domain::{
    BusinessEntity, CostBreakdown, CountrySegment, EmptyDriving, Route, Transport,
};
use loadquote_domain::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Route lookup with ordered country segments and timeline events.
#[async_trait]
pub trait RouteRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Route>>;

    /// The route a cargo is assigned to, if any.
    async fn find_by_cargo_id(&self, cargo_id: Uuid) -> Result<Option<Route>>;

    async fn save(&self, route: Route) -> Result<Route>;
}

/// Transport lookup (truck and driver specifications).
#[async_trait]
pub trait TransportRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transport>>;
}

/// Business entity lookup (operating countries and cost overheads).
#[async_trait]
pub trait BusinessRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BusinessEntity>>;
}

/// Lookup for the unloaded leg preceding pickup.
#[async_trait]
pub trait EmptyDrivingRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<EmptyDriving>>;
}

/// Persistence port for calculation results. Saving overwrites any previous
/// breakdown for the same route; only the latest is retrievable.
#[async_trait]
pub trait CostBreakdownRepository: Send + Sync {
    async fn save(&self, breakdown: CostBreakdown) -> Result<CostBreakdown>;

    async fn find_by_route_id(&self, route_id: Uuid) -> Result<Option<CostBreakdown>>;
}

/// Truck classification values handed to the toll collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruckTollSpecs {
    pub toll_class: String,
    pub euro_class: String,
    pub co2_class: String,
}

/// Optional hints a business override may be keyed on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TollOverrides {
    pub vehicle_class: Option<String>,
    pub route_type: Option<String>,
}

/// External toll-calculation collaborator.
#[async_trait]
pub trait TollCalculator: Send + Sync {
    /// Toll cost for one country segment. The collaborator may apply a
    /// business-specific multiplier override when a business id is given.
    async fn calculate_toll(
        &self,
        segment: &CountrySegment,
        truck_specs: &TruckTollSpecs,
        business_id: Option<Uuid>,
        overrides: Option<&TollOverrides>,
    ) -> Result<Decimal>;
}
