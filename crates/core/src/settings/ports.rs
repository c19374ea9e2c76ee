//! Port interfaces for cost-settings management.

use async_trait::async_trait;
use loadquote_domain::{CostSettings, Result};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Persistence port for per-route cost settings.
#[async_trait]
pub trait CostSettingsRepository: Send + Sync {
    async fn save(&self, settings: CostSettings) -> Result<CostSettings>;

    async fn find_by_route_id(&self, route_id: Uuid) -> Result<Option<CostSettings>>;
}

/// Country fuel-rate lookup with region-based fallback for unknown countries.
#[async_trait]
pub trait FuelRateSource: Send + Sync {
    async fn fuel_rate(&self, country_code: &str) -> Result<Decimal>;
}
