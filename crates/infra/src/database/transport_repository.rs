//! SQLite implementation of the `TransportRepository` port.

use std::sync::Arc;

use async_trait::async_trait;
use loadquote_core::costing::ports::TransportRepository;
use loadquote_domain::{DriverSpecification, Result, Transport, TruckSpecification};
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use super::{from_json, parse_uuid, run_blocking, to_json, DbConnection, DbManager};
use crate::errors::InfraError;

const INSERT_SQL: &str = "INSERT OR REPLACE INTO transports (
        id, transport_type_id, business_entity_id, truck_specs, driver_specs, is_active
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const FIND_SQL: &str = "SELECT id, transport_type_id, business_entity_id,
        truck_specs, driver_specs, is_active
    FROM transports WHERE id = ?1";

pub struct SqliteTransportRepository {
    db: Arc<DbManager>,
}

impl SqliteTransportRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Persist a transport. Not part of the core port; used by seeding and
    /// administration paths.
    pub async fn save(&self, transport: Transport) -> Result<Transport> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            insert_transport(&conn, &transport)?;
            Ok(transport)
        })
        .await
    }
}

#[async_trait]
impl TransportRepository for SqliteTransportRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transport>> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            find_transport(&conn, id)
        })
        .await
    }
}

fn insert_transport(conn: &DbConnection, transport: &Transport) -> Result<()> {
    conn.execute(
        INSERT_SQL,
        params![
            transport.id.to_string(),
            transport.transport_type_id,
            transport.business_entity_id.to_string(),
            to_json(&transport.truck_specs)?,
            to_json(&transport.driver_specs)?,
            transport.is_active,
        ],
    )
    .map_err(InfraError::from)?;
    Ok(())
}

type TransportRow = (String, String, String, String, String, bool);

fn find_transport(conn: &DbConnection, id: Uuid) -> Result<Option<Transport>> {
    let row: Option<TransportRow> = conn
        .query_row(FIND_SQL, params![id.to_string()], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?))
        })
        .optional()
        .map_err(InfraError::from)?;

    row.map(transport_from_row).transpose()
}

fn transport_from_row(row: TransportRow) -> Result<Transport> {
    let (id, transport_type_id, business_entity_id, truck_specs, driver_specs, is_active) = row;
    Ok(Transport {
        id: parse_uuid(&id)?,
        transport_type_id,
        business_entity_id: parse_uuid(&business_entity_id)?,
        truck_specs: from_json::<TruckSpecification>(&truck_specs)?,
        driver_specs: from_json::<DriverSpecification>(&driver_specs)?,
        is_active,
    })
}
