//! SQLite implementation of the `CostBreakdownRepository` port.
//!
//! One breakdown per route: `route_id` is unique and recalculation replaces
//! the stored row, so only the latest result is retrievable.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use loadquote_core::costing::ports::CostBreakdownRepository;
use loadquote_domain::{CostBreakdown, DriverCostBreakdown, Result};
use rusqlite::{params, OptionalExtension};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{from_json, parse_decimal, parse_uuid, run_blocking, to_json, DbConnection, DbManager};
use crate::errors::InfraError;

const INSERT_SQL: &str = "INSERT OR REPLACE INTO cost_breakdowns (
        id, route_id, fuel_costs, toll_costs, driver_costs,
        overhead_costs, timeline_event_costs, total_cost
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

const FIND_SQL: &str = "SELECT id, route_id, fuel_costs, toll_costs, driver_costs,
        overhead_costs, timeline_event_costs, total_cost
    FROM cost_breakdowns WHERE route_id = ?1";

pub struct SqliteCostBreakdownRepository {
    db: Arc<DbManager>,
}

impl SqliteCostBreakdownRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CostBreakdownRepository for SqliteCostBreakdownRepository {
    async fn save(&self, breakdown: CostBreakdown) -> Result<CostBreakdown> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            insert_breakdown(&conn, &breakdown)?;
            Ok(breakdown)
        })
        .await
    }

    async fn find_by_route_id(&self, route_id: Uuid) -> Result<Option<CostBreakdown>> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            let row: Option<BreakdownRow> = conn
                .query_row(FIND_SQL, params![route_id.to_string()], |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                        row.get(6)?,
                        row.get(7)?,
                    ))
                })
                .optional()
                .map_err(InfraError::from)?;
            row.map(breakdown_from_row).transpose()
        })
        .await
    }
}

fn insert_breakdown(conn: &DbConnection, breakdown: &CostBreakdown) -> Result<()> {
    conn.execute(
        INSERT_SQL,
        params![
            breakdown.id.to_string(),
            breakdown.route_id.to_string(),
            to_json(&breakdown.fuel_costs)?,
            to_json(&breakdown.toll_costs)?,
            to_json(&breakdown.driver_costs)?,
            breakdown.overhead_costs.to_string(),
            to_json(&breakdown.timeline_event_costs)?,
            breakdown.total_cost.to_string(),
        ],
    )
    .map_err(InfraError::from)?;
    Ok(())
}

type BreakdownRow = (String, String, String, String, String, String, String, String);

fn breakdown_from_row(row: BreakdownRow) -> Result<CostBreakdown> {
    let (
        id,
        route_id,
        fuel_costs,
        toll_costs,
        driver_costs,
        overhead_costs,
        timeline_event_costs,
        total_cost,
    ) = row;

    Ok(CostBreakdown {
        id: parse_uuid(&id)?,
        route_id: parse_uuid(&route_id)?,
        fuel_costs: from_json::<BTreeMap<String, Decimal>>(&fuel_costs)?,
        toll_costs: from_json::<BTreeMap<String, Decimal>>(&toll_costs)?,
        driver_costs: from_json::<DriverCostBreakdown>(&driver_costs)?,
        overhead_costs: parse_decimal(&overhead_costs)?,
        timeline_event_costs: from_json::<BTreeMap<String, Decimal>>(&timeline_event_costs)?,
        total_cost: parse_decimal(&total_cost)?,
    })
}
