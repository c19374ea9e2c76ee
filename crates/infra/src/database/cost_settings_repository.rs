//! SQLite implementation of the `CostSettingsRepository` port.
//!
//! `route_id` is unique; saving settings for an already-configured route
//! replaces the stored row.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use loadquote_core::settings::ports::CostSettingsRepository;
use loadquote_domain::{CostComponent, CostSettings, Result};
use rusqlite::{params, OptionalExtension};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{from_json, parse_uuid, run_blocking, to_json, DbConnection, DbManager};
use crate::errors::InfraError;

const INSERT_SQL: &str = "INSERT OR REPLACE INTO cost_settings (
        id, route_id, business_entity_id, enabled_components, rates
    ) VALUES (?1, ?2, ?3, ?4, ?5)";

const FIND_SQL: &str = "SELECT id, route_id, business_entity_id, enabled_components, rates
    FROM cost_settings WHERE route_id = ?1";

pub struct SqliteCostSettingsRepository {
    db: Arc<DbManager>,
}

impl SqliteCostSettingsRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CostSettingsRepository for SqliteCostSettingsRepository {
    async fn save(&self, settings: CostSettings) -> Result<CostSettings> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            insert_settings(&conn, &settings)?;
            Ok(settings)
        })
        .await
    }

    async fn find_by_route_id(&self, route_id: Uuid) -> Result<Option<CostSettings>> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            let row: Option<SettingsRow> = conn
                .query_row(FIND_SQL, params![route_id.to_string()], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
                })
                .optional()
                .map_err(InfraError::from)?;
            row.map(settings_from_row).transpose()
        })
        .await
    }
}

fn insert_settings(conn: &DbConnection, settings: &CostSettings) -> Result<()> {
    conn.execute(
        INSERT_SQL,
        params![
            settings.id.to_string(),
            settings.route_id.to_string(),
            settings.business_entity_id.to_string(),
            to_json(&settings.enabled_components)?,
            to_json(&settings.rates)?,
        ],
    )
    .map_err(InfraError::from)?;
    Ok(())
}

type SettingsRow = (String, String, String, String, String);

fn settings_from_row(row: SettingsRow) -> Result<CostSettings> {
    let (id, route_id, business_entity_id, enabled_components, rates) = row;
    Ok(CostSettings {
        id: parse_uuid(&id)?,
        route_id: parse_uuid(&route_id)?,
        business_entity_id: parse_uuid(&business_entity_id)?,
        enabled_components: from_json::<BTreeSet<CostComponent>>(&enabled_components)?,
        rates: from_json::<BTreeMap<String, Decimal>>(&rates)?,
    })
}
