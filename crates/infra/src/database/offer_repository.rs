//! SQLite implementation of the `OfferRepository` port.

use std::sync::Arc;

use async_trait::async_trait;
use loadquote_core::offers::ports::OfferRepository;
use loadquote_domain::{Offer, OfferStatus, OfferStatusEvent, Result, StatusTrigger};
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use super::{parse_decimal, parse_timestamp, parse_uuid, run_blocking, DbConnection, DbManager};
use crate::errors::InfraError;

const INSERT_SQL: &str = "INSERT OR REPLACE INTO offers (
        id, route_id, cost_breakdown_id, margin_percentage, final_price,
        ai_content, fun_fact, status, created_at, finalized_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";

const FIND_SQL: &str = "SELECT id, route_id, cost_breakdown_id, margin_percentage,
        final_price, ai_content, fun_fact, status, created_at, finalized_at
    FROM offers WHERE id = ?1";

const EVENT_INSERT_SQL: &str = "INSERT INTO offer_status_history (
        id, offer_id, old_status, new_status, trigger_source, comment, timestamp
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

const HISTORY_SQL: &str = "SELECT id, offer_id, old_status, new_status, trigger_source,
        comment, timestamp
    FROM offer_status_history
    WHERE offer_id = ?1
    ORDER BY timestamp DESC";

pub struct SqliteOfferRepository {
    db: Arc<DbManager>,
}

impl SqliteOfferRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OfferRepository for SqliteOfferRepository {
    async fn save(&self, offer: Offer) -> Result<Offer> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            insert_offer(&conn, &offer)?;
            Ok(offer)
        })
        .await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            let row: Option<OfferRow> = conn
                .query_row(FIND_SQL, params![id.to_string()], offer_row)
                .optional()
                .map_err(InfraError::from)?;
            row.map(offer_from_row).transpose()
        })
        .await
    }

    async fn append_status_event(&self, event: OfferStatusEvent) -> Result<()> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            conn.execute(
                EVENT_INSERT_SQL,
                params![
                    event.id.to_string(),
                    event.offer_id.to_string(),
                    event.old_status.as_str(),
                    event.new_status.as_str(),
                    event.trigger.as_str(),
                    event.comment,
                    event.timestamp.to_rfc3339(),
                ],
            )
            .map_err(InfraError::from)?;
            Ok(())
        })
        .await
    }

    async fn status_history(&self, offer_id: Uuid) -> Result<Vec<OfferStatusEvent>> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(HISTORY_SQL).map_err(InfraError::from)?;
            let rows = stmt
                .query_map(params![offer_id.to_string()], |row| {
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

            rows.into_iter().map(event_from_row).collect()
        })
        .await
    }
}

fn insert_offer(conn: &DbConnection, offer: &Offer) -> Result<()> {
    conn.execute(
        INSERT_SQL,
        params![
            offer.id.to_string(),
            offer.route_id.to_string(),
            offer.cost_breakdown_id.to_string(),
            offer.margin_percentage.to_string(),
            offer.final_price.to_string(),
            offer.ai_content,
            offer.fun_fact,
            offer.status.as_str(),
            offer.created_at.to_rfc3339(),
            offer.finalized_at.map(|at| at.to_rfc3339()),
        ],
    )
    .map_err(InfraError::from)?;
    Ok(())
}

type OfferRow = (
    String,
    String,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    String,
    String,
    Option<String>,
);

fn offer_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<OfferRow> {
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
    ))
}

fn offer_from_row(row: OfferRow) -> Result<Offer> {
    let (
        id,
        route_id,
        cost_breakdown_id,
        margin_percentage,
        final_price,
        ai_content,
        fun_fact,
        status,
        created_at,
        finalized_at,
    ) = row;

    Ok(Offer {
        id: parse_uuid(&id)?,
        route_id: parse_uuid(&route_id)?,
        cost_breakdown_id: parse_uuid(&cost_breakdown_id)?,
        margin_percentage: parse_decimal(&margin_percentage)?,
        final_price: parse_decimal(&final_price)?,
        ai_content,
        fun_fact,
        status: status.parse::<OfferStatus>()?,
        created_at: parse_timestamp(&created_at)?,
        finalized_at: finalized_at.as_deref().map(parse_timestamp).transpose()?,
    })
}

type EventRow = (String, String, String, String, String, Option<String>, String);

fn event_from_row(row: EventRow) -> Result<OfferStatusEvent> {
    let (id, offer_id, old_status, new_status, trigger, comment, timestamp) = row;
    Ok(OfferStatusEvent {
        id: parse_uuid(&id)?,
        offer_id: parse_uuid(&offer_id)?,
        old_status: old_status.parse::<OfferStatus>()?,
        new_status: new_status.parse::<OfferStatus>()?,
        trigger: trigger.parse::<StatusTrigger>()?,
        comment,
        timestamp: parse_timestamp(&timestamp)?,
    })
}
