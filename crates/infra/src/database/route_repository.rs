//! SQLite implementation of the `RouteRepository` port.
//!
//! Timeline events and country segments are stored as JSON documents on the
//! route row; their ordering fields travel inside the JSON.

use std::sync::Arc;

use async_trait::async_trait;
use loadquote_core::costing::ports::RouteRepository;
use loadquote_domain::{CountrySegment, Result, Route, RouteStatus, TimelineEvent};
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use super::{from_json, parse_uuid, run_blocking, to_json, DbConnection, DbManager};
use crate::errors::InfraError;

const INSERT_SQL: &str = "INSERT OR REPLACE INTO routes (
        id, transport_id, business_entity_id, cargo_id, empty_driving_id,
        timeline_events, country_segments, total_distance_km, total_duration_hours,
        is_feasible, status
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";

const SELECT_COLUMNS: &str = "SELECT id, transport_id, business_entity_id, cargo_id,
        empty_driving_id, timeline_events, country_segments, total_distance_km,
        total_duration_hours, is_feasible, status
    FROM routes";

pub struct SqliteRouteRepository {
    db: Arc<DbManager>,
}

impl SqliteRouteRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RouteRepository for SqliteRouteRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Route>> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            find_route(&conn, "WHERE id = ?1", id.to_string())
        })
        .await
    }

    async fn find_by_cargo_id(&self, cargo_id: Uuid) -> Result<Option<Route>> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            find_route(&conn, "WHERE cargo_id = ?1", cargo_id.to_string())
        })
        .await
    }

    async fn save(&self, route: Route) -> Result<Route> {
        let db = Arc::clone(&self.db);
        run_blocking(move || {
            let conn = db.get_connection()?;
            insert_route(&conn, &route)?;
            Ok(route)
        })
        .await
    }
}

fn insert_route(conn: &DbConnection, route: &Route) -> Result<()> {
    conn.execute(
        INSERT_SQL,
        params![
            route.id.to_string(),
            route.transport_id.to_string(),
            route.business_entity_id.to_string(),
            route.cargo_id.map(|id| id.to_string()),
            route.empty_driving_id.to_string(),
            to_json(&route.timeline_events)?,
            to_json(&route.country_segments)?,
            route.total_distance_km,
            route.total_duration_hours,
            route.is_feasible,
            route.status.as_str(),
        ],
    )
    .map_err(InfraError::from)?;
    Ok(())
}

type RouteRow =
    (String, String, String, Option<String>, String, String, String, f64, f64, bool, String);

fn find_route(conn: &DbConnection, predicate: &str, key: String) -> Result<Option<Route>> {
    let sql = format!("{SELECT_COLUMNS} {predicate}");
    let row: Option<RouteRow> = conn
        .query_row(&sql, params![key], |row| {
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
        })
        .optional()
        .map_err(InfraError::from)?;

    row.map(route_from_row).transpose()
}

fn route_from_row(row: RouteRow) -> Result<Route> {
    let (
        id,
        transport_id,
        business_entity_id,
        cargo_id,
        empty_driving_id,
        timeline_events,
        country_segments,
        total_distance_km,
        total_duration_hours,
        is_feasible,
        status,
    ) = row;

    Ok(Route {
        id: parse_uuid(&id)?,
        transport_id: parse_uuid(&transport_id)?,
        business_entity_id: parse_uuid(&business_entity_id)?,
        cargo_id: cargo_id.as_deref().map(parse_uuid).transpose()?,
        empty_driving_id: parse_uuid(&empty_driving_id)?,
        timeline_events: from_json::<Vec<TimelineEvent>>(&timeline_events)?,
        country_segments: from_json::<Vec<CountrySegment>>(&country_segments)?,
        total_distance_km,
        total_duration_hours,
        is_feasible,
        status: status.parse::<RouteStatus>()?,
    })
}
