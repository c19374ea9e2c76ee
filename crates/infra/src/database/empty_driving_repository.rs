//! SQLite implementation of the `EmptyDrivingRepository` port.

use std::sync::Arc;

use async_trait::async_trait;
use loadquote_core::costing::ports::EmptyDrivingRepository;
use loadquote_domain::{EmptyDriving, Result};
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use super::{parse_uuid, run_blocking, DbConnection, DbManager};
use crate::errors::InfraError;

const INSERT_SQL: &str = "INSERT OR REPLACE INTO empty_drivings (
        id, distance_km, duration_hours
    ) VALUES (?1, ?2, ?3)";

const FIND_SQL: &str =
    "SELECT id, distance_km, duration_hours FROM empty_drivings WHERE id = ?1";

pub struct SqliteEmptyDrivingRepository {
    db: Arc<DbManager>,
}

impl SqliteEmptyDrivingRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Persist an empty-driving record ahead of route planning.
    pub async fn save(&self, record: EmptyDriving) -> Result<EmptyDriving> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            conn.execute(
                INSERT_SQL,
                params![record.id.to_string(), record.distance_km, record.duration_hours],
            )
            .map_err(InfraError::from)?;
            Ok(record)
        })
        .await
    }
}

#[async_trait]
impl EmptyDrivingRepository for SqliteEmptyDrivingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<EmptyDriving>> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            find_record(&conn, id)
        })
        .await
    }
}

fn find_record(conn: &DbConnection, id: Uuid) -> Result<Option<EmptyDriving>> {
    let row: Option<(String, f64, f64)> = conn
        .query_row(FIND_SQL, params![id.to_string()], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })
        .optional()
        .map_err(InfraError::from)?;

    row.map(|(id, distance_km, duration_hours)| {
        Ok(EmptyDriving { id: parse_uuid(&id)?, distance_km, duration_hours })
    })
    .transpose()
}
