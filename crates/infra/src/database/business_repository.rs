//! SQLite implementation of the `BusinessRepository` port.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use loadquote_core::costing::ports::BusinessRepository;
use loadquote_domain::{BusinessEntity, Result};
use rusqlite::{params, OptionalExtension};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{from_json, parse_uuid, run_blocking, to_json, DbConnection, DbManager};
use crate::errors::InfraError;

const INSERT_SQL: &str = "INSERT OR REPLACE INTO business_entities (
        id, name, certifications, operating_countries, cost_overheads, is_active
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const FIND_SQL: &str = "SELECT id, name, certifications, operating_countries,
        cost_overheads, is_active
    FROM business_entities WHERE id = ?1";

pub struct SqliteBusinessRepository {
    db: Arc<DbManager>,
}

impl SqliteBusinessRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Persist a business entity. Not part of the core port; used by
    /// seeding and administration paths.
    pub async fn save(&self, business: BusinessEntity) -> Result<BusinessEntity> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            insert_business(&conn, &business)?;
            Ok(business)
        })
        .await
    }
}

#[async_trait]
impl BusinessRepository for SqliteBusinessRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BusinessEntity>> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            find_business(&conn, id)
        })
        .await
    }
}

fn insert_business(conn: &DbConnection, business: &BusinessEntity) -> Result<()> {
    conn.execute(
        INSERT_SQL,
        params![
            business.id.to_string(),
            business.name,
            to_json(&business.certifications)?,
            to_json(&business.operating_countries)?,
            to_json(&business.cost_overheads)?,
            business.is_active,
        ],
    )
    .map_err(InfraError::from)?;
    Ok(())
}

type BusinessRow = (String, String, String, String, String, bool);

fn find_business(conn: &DbConnection, id: Uuid) -> Result<Option<BusinessEntity>> {
    let row: Option<BusinessRow> = conn
        .query_row(FIND_SQL, params![id.to_string()], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?))
        })
        .optional()
        .map_err(InfraError::from)?;

    row.map(business_from_row).transpose()
}

fn business_from_row(row: BusinessRow) -> Result<BusinessEntity> {
    let (id, name, certifications, operating_countries, cost_overheads, is_active) = row;
    Ok(BusinessEntity {
        id: parse_uuid(&id)?,
        name,
        certifications: from_json::<Vec<String>>(&certifications)?,
        operating_countries: from_json::<BTreeSet<String>>(&operating_countries)?,
        cost_overheads: from_json::<BTreeMap<String, Decimal>>(&cost_overheads)?,
        is_active,
    })
}
