//! SQLite implementation of the `CargoRepository` port.
//!
//! The status history table is append-only; nothing ever updates or deletes
//! its rows, including saga compensation.

use std::sync::Arc;

use async_trait::async_trait;
use loadquote_core::cargo::ports::CargoRepository;
use loadquote_domain::{
    Cargo, CargoStatus, CargoStatusHistoryEntry, Result, StatusTrigger,
};
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use super::{
    from_json, parse_decimal, parse_timestamp, parse_uuid, run_blocking, to_json,
    DbConnection, DbManager,
};
use crate::errors::InfraError;

const INSERT_SQL: &str = "INSERT OR REPLACE INTO cargo (
        id, business_entity_id, weight, volume, cargo_type, value,
        special_requirements, status, is_active, created_at, updated_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";

const FIND_SQL: &str = "SELECT id, business_entity_id, weight, volume, cargo_type, value,
        special_requirements, status, is_active, created_at, updated_at
    FROM cargo WHERE id = ?1";

const LIST_SQL: &str = "SELECT id, business_entity_id, weight, volume, cargo_type, value,
        special_requirements, status, is_active, created_at, updated_at
    FROM cargo WHERE is_active = 1
    ORDER BY created_at DESC
    LIMIT ?1 OFFSET ?2";

const COUNT_SQL: &str = "SELECT COUNT(*) FROM cargo WHERE is_active = 1";

const HISTORY_INSERT_SQL: &str = "INSERT INTO cargo_status_history (
        id, cargo_id, old_status, new_status, trigger_source, trigger_id, timestamp
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

const HISTORY_SQL: &str = "SELECT id, cargo_id, old_status, new_status, trigger_source,
        trigger_id, timestamp
    FROM cargo_status_history
    WHERE cargo_id = ?1
    ORDER BY timestamp DESC";

pub struct SqliteCargoRepository {
    db: Arc<DbManager>,
}

impl SqliteCargoRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CargoRepository for SqliteCargoRepository {
    async fn save(&self, cargo: Cargo) -> Result<Cargo> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            insert_cargo(&conn, &cargo)?;
            Ok(cargo)
        })
        .await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Cargo>> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            let row: Option<CargoRow> = conn
                .query_row(FIND_SQL, params![id.to_string()], cargo_row)
                .optional()
                .map_err(InfraError::from)?;
            row.map(cargo_from_row).transpose()
        })
        .await
    }

    async fn append_status_history(&self, entry: CargoStatusHistoryEntry) -> Result<()> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            conn.execute(
                HISTORY_INSERT_SQL,
                params![
                    entry.id.to_string(),
                    entry.cargo_id.to_string(),
                    entry.old_status.as_str(),
                    entry.new_status.as_str(),
                    entry.trigger.as_str(),
                    entry.trigger_id,
                    entry.timestamp.to_rfc3339(),
                ],
            )
            .map_err(InfraError::from)?;
            Ok(())
        })
        .await
    }

    async fn status_history(&self, cargo_id: Uuid) -> Result<Vec<CargoStatusHistoryEntry>> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(HISTORY_SQL).map_err(InfraError::from)?;
            let rows = stmt
                .query_map(params![cargo_id.to_string()], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, Option<String>>(5)?,
                        row.get::<_, String>(6)?,
                    ))
                })
                .map_err(InfraError::from)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(InfraError::from)?;

            rows.into_iter().map(history_from_row).collect()
        })
        .await
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Cargo>> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(LIST_SQL).map_err(InfraError::from)?;
            let rows = stmt
                .query_map(params![limit, offset], cargo_row)
                .map_err(InfraError::from)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(InfraError::from)?;

            rows.into_iter().map(cargo_from_row).collect()
        })
        .await
    }

    async fn count(&self) -> Result<u64> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            let count: u64 = conn
                .query_row(COUNT_SQL, params![], |row| row.get(0))
                .map_err(InfraError::from)?;
            Ok(count)
        })
        .await
    }
}

fn insert_cargo(conn: &DbConnection, cargo: &Cargo) -> Result<()> {
    conn.execute(
        INSERT_SQL,
        params![
            cargo.id.to_string(),
            cargo.business_entity_id.map(|id| id.to_string()),
            cargo.weight,
            cargo.volume,
            cargo.cargo_type,
            cargo.value.to_string(),
            to_json(&cargo.special_requirements)?,
            cargo.status.as_str(),
            cargo.is_active,
            cargo.created_at.to_rfc3339(),
            cargo.updated_at.to_rfc3339(),
        ],
    )
    .map_err(InfraError::from)?;
    Ok(())
}

type CargoRow = (
    String,
    Option<String>,
    f64,
    f64,
    String,
    String,
    String,
    String,
    bool,
    String,
    String,
);

fn cargo_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CargoRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
        row.get(10)?,
    ))
}

fn cargo_from_row(row: CargoRow) -> Result<Cargo> {
    let (
        id,
        business_entity_id,
        weight,
        volume,
        cargo_type,
        value,
        special_requirements,
        status,
        is_active,
        created_at,
        updated_at,
    ) = row;

    Ok(Cargo {
        id: parse_uuid(&id)?,
        business_entity_id: business_entity_id.as_deref().map(parse_uuid).transpose()?,
        weight,
        volume,
        cargo_type,
        value: parse_decimal(&value)?,
        special_requirements: from_json::<Vec<String>>(&special_requirements)?,
        status: status.parse::<CargoStatus>()?,
        is_active,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

type HistoryRow = (String, String, String, String, String, Option<String>, String);

fn history_from_row(row: HistoryRow) -> Result<CargoStatusHistoryEntry> {
    let (id, cargo_id, old_status, new_status, trigger, trigger_id, timestamp) = row;
    Ok(CargoStatusHistoryEntry {
        id: parse_uuid(&id)?,
        cargo_id: parse_uuid(&cargo_id)?,
        old_status: old_status.parse::<CargoStatus>()?,
        new_status: new_status.parse::<CargoStatus>()?,
        trigger: trigger.parse::<StatusTrigger>()?,
        trigger_id,
        timestamp: parse_timestamp(&timestamp)?,
    })
}
