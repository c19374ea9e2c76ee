//! SQLite implementation of the `RateScheduleRepository` port.
//!
//! Stores per-rate-type overrides of the built-in validation bounds. Absent
//! rows fall through to the compiled defaults in the core catalog.

use std::sync::Arc;

use async_trait::async_trait;
use loadquote_core::rates::ports::RateScheduleRepository;
use loadquote_domain::types::rates::{RateType, RateValidationSchema};
use loadquote_domain::Result;
use rusqlite::{params, OptionalExtension};

use super::{parse_decimal, run_blocking, DbConnection, DbManager};
use crate::errors::InfraError;

const INSERT_SQL: &str = "INSERT OR REPLACE INTO rate_validation_schemas (
        rate_type, min_value, max_value, country_specific, requires_certification
    ) VALUES (?1, ?2, ?3, ?4, ?5)";

const FIND_SQL: &str = "SELECT rate_type, min_value, max_value, country_specific,
        requires_certification
    FROM rate_validation_schemas WHERE rate_type = ?1";

pub struct SqliteRateScheduleRepository {
    db: Arc<DbManager>,
}

impl SqliteRateScheduleRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RateScheduleRepository for SqliteRateScheduleRepository {
    async fn find_schema(&self, rate_type: RateType) -> Result<Option<RateValidationSchema>> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            find_schema(&conn, rate_type)
        })
        .await
    }

    async fn save_schema(&self, schema: RateValidationSchema) -> Result<()> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            conn.execute(
                INSERT_SQL,
                params![
                    schema.rate_type.as_str(),
                    schema.min_value.to_string(),
                    schema.max_value.to_string(),
                    schema.country_specific,
                    schema.requires_certification,
                ],
            )
            .map_err(InfraError::from)?;
            Ok(())
        })
        .await
    }
}

type SchemaRow = (String, String, String, bool, bool);

fn find_schema(conn: &DbConnection, rate_type: RateType) -> Result<Option<RateValidationSchema>> {
    let row: Option<SchemaRow> = conn
        .query_row(FIND_SQL, params![rate_type.as_str()], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
        })
        .optional()
        .map_err(InfraError::from)?;

    row.map(schema_from_row).transpose()
}

fn schema_from_row(row: SchemaRow) -> Result<RateValidationSchema> {
    let (rate_type, min_value, max_value, country_specific, requires_certification) = row;
    Ok(RateValidationSchema {
        rate_type: rate_type.parse::<RateType>()?,
        min_value: parse_decimal(&min_value)?,
        max_value: parse_decimal(&max_value)?,
        country_specific,
        requires_certification,
    })
}
