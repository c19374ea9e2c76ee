//! Port interfaces for rate-schema persistence.

use async_trait::async_trait;
use loadquote_domain::types::rates::{RateType, RateValidationSchema};
use loadquote_domain::Result;

/// Persisted overrides of the built-in rate validation schemas.
#[async_trait]
pub trait RateScheduleRepository: Send + Sync {
    /// Return the stored override for a rate type, if any.
    async fn find_schema(&self, rate_type: RateType) -> Result<Option<RateValidationSchema>>;

    /// Persist (create or replace) an override schema.
    async fn save_schema(&self, schema: RateValidationSchema) -> Result<()>;
}
