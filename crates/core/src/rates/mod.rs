//! Rate catalog - schema lookup and rate-map validation.

pub mod ports;

use std::collections::BTreeMap;
use std::sync::Arc;

use loadquote_domain::types::rates::{
    default_validation_schemas, validate_rate, RateType, RateValidationSchema,
};
use loadquote_domain::Result;
use rust_decimal::Decimal;

use ports::RateScheduleRepository;

/// Outcome of validating a full rates map.
#[derive(Debug, Clone, Default)]
pub struct RateValidationReport {
    pub valid: bool,
    /// One message per offending entry, in rates-map iteration order.
    pub errors: Vec<String>,
}

impl RateValidationReport {
    /// Collapse the report into a single aggregated message.
    pub fn into_message(self) -> String {
        self.errors.join("; ")
    }
}

/// Schema lookup over persisted overrides with built-in defaults as fallback.
pub struct RateCatalog {
    overrides: Option<Arc<dyn RateScheduleRepository>>,
}

impl RateCatalog {
    /// Catalog backed only by the built-in default schemas.
    pub fn new() -> Self {
        Self { overrides: None }
    }

    /// Catalog that consults persisted overrides before the defaults.
    pub fn with_overrides(overrides: Arc<dyn RateScheduleRepository>) -> Self {
        Self { overrides: Some(overrides) }
    }

    /// Resolve the effective schema for a rate type.
    pub async fn schema_for(&self, rate_type: RateType) -> Result<RateValidationSchema> {
        if let Some(repo) = &self.overrides {
            if let Some(schema) = repo.find_schema(rate_type).await? {
                return Ok(schema);
            }
        }
        Ok(default_validation_schemas()[&rate_type].clone())
    }

    /// Validate every entry of a rates map.
    ///
    /// Unknown keys and out-of-bounds values are reported per entry; the
    /// report stays in map iteration order so messages are deterministic.
    pub async fn validate_rates(
        &self,
        rates: &BTreeMap<String, Decimal>,
    ) -> Result<RateValidationReport> {
        let mut errors = Vec::new();

        for (key, value) in rates {
            let rate_type = match key.parse::<RateType>() {
                Ok(ty) => ty,
                Err(_) => {
                    errors.push(format!("Unknown rate type: {key}"));
                    continue;
                }
            };

            let schema = self.schema_for(rate_type).await?;
            if !validate_rate(rate_type, *value, &schema) {
                errors.push(format!(
                    "Rate {key} value {value} outside allowed range [{}, {}]",
                    schema.min_value, schema.max_value
                ));
            }
        }

        Ok(RateValidationReport { valid: errors.is_empty(), errors })
    }
}

impl Default for RateCatalog {
    fn default() -> Self {
        Self::new()
    }
}
