//! SQLite-backed implementations of the persistence ports.

pub mod business_repository;
pub mod cargo_repository;
pub mod cost_breakdown_repository;
pub mod cost_settings_repository;
pub mod empty_driving_repository;
pub mod manager;
pub mod offer_repository;
pub mod rate_schema_repository;
pub mod route_repository;
pub mod transport_repository;

pub use business_repository::SqliteBusinessRepository;
pub use cargo_repository::SqliteCargoRepository;
pub use cost_breakdown_repository::SqliteCostBreakdownRepository;
pub use cost_settings_repository::SqliteCostSettingsRepository;
pub use empty_driving_repository::SqliteEmptyDrivingRepository;
pub use manager::{DbConnection, DbManager};
pub use offer_repository::SqliteOfferRepository;
pub use rate_schema_repository::SqliteRateScheduleRepository;
pub use route_repository::SqliteRouteRepository;
pub use transport_repository::SqliteTransportRepository;

use chrono::{DateTime, Utc};
use loadquote_domain::{LoadQuoteError, Result};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// Run a blocking database closure on the tokio blocking pool.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| LoadQuoteError::Internal(format!("blocking task failed: {err}")))?
}

pub(crate) fn parse_uuid(raw: &str) -> Result<Uuid> {
    raw.parse::<Uuid>()
        .map_err(|err| LoadQuoteError::Internal(format!("invalid uuid {raw}: {err}")))
}

pub(crate) fn parse_decimal(raw: &str) -> Result<Decimal> {
    raw.parse::<Decimal>()
        .map_err(|err| LoadQuoteError::Internal(format!("invalid decimal {raw}: {err}")))
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| LoadQuoteError::Internal(format!("invalid timestamp {raw}: {err}")))
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|err| LoadQuoteError::Internal(err.to_string()))
}

pub(crate) fn from_json<T: DeserializeOwned>(raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|err| LoadQuoteError::Internal(err.to_string()))
}
