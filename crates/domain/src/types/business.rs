//! Business entity: the transport company quoting the job.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A transport company with its operating footprint and cost overheads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessEntity {
    pub id: Uuid,
    pub name: String,
    pub certifications: Vec<String>,
    /// ISO country codes the company may operate in. Routes touching other
    /// countries fail the coverage check.
    pub operating_countries: BTreeSet<String>,
    /// Flat overhead costs by category (admin, insurance, facilities, ...).
    pub cost_overheads: BTreeMap<String, Decimal>,
    pub is_active: bool,
}

impl BusinessEntity {
    pub fn operates_in(&self, country_code: &str) -> bool {
        self.operating_countries.contains(country_code)
    }
}
