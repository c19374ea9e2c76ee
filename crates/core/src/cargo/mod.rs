//! Cargo management - creation, guarded status updates, route cascade.
//!
//! Manual cargo status changes share the transition tables with the
//! finalization saga, and additionally cascade onto the assigned route and
//! its timeline events.

pub mod ports;

use std::sync::Arc;

use chrono::Utc;
use loadquote_domain::{
    Cargo, CargoStatus, CargoStatusHistoryEntry, LoadQuoteError, Result, RouteStatus,
    StatusTrigger, TimelineEventStatus,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::costing::ports::{BusinessRepository, RouteRepository};
use crate::status::{ensure_cargo_transition, ensure_route_transition};
use ports::CargoRepository;

/// Input for creating a cargo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CargoDraft {
    pub business_entity_id: Option<Uuid>,
    pub weight: f64,
    pub volume: f64,
    pub cargo_type: String,
    pub value: Decimal,
    #[serde(default)]
    pub special_requirements: Vec<String>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CargoUpdate {
    pub weight: Option<f64>,
    pub volume: Option<f64>,
    pub cargo_type: Option<String>,
    pub value: Option<Decimal>,
    pub special_requirements: Option<Vec<String>>,
    pub status: Option<CargoStatus>,
}

/// One page of a cargo listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CargoPage {
    pub items: Vec<Cargo>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

/// Service managing cargo and the route-status cascade.
pub struct CargoService {
    cargo_repo: Arc<dyn CargoRepository>,
    route_repo: Arc<dyn RouteRepository>,
    business_repo: Arc<dyn BusinessRepository>,
}

impl CargoService {
    pub fn new(
        cargo_repo: Arc<dyn CargoRepository>,
        route_repo: Arc<dyn RouteRepository>,
        business_repo: Arc<dyn BusinessRepository>,
    ) -> Self {
        Self { cargo_repo, route_repo, business_repo }
    }

    /// Create a pending cargo. A referenced business entity must exist and
    /// be active.
    pub async fn create_cargo(&self, draft: CargoDraft) -> Result<Cargo> {
        if let Some(business_id) = draft.business_entity_id {
            let business = self
                .business_repo
                .find_by_id(business_id)
                .await?
                .ok_or_else(|| LoadQuoteError::not_found("business entity", business_id))?;
            if !business.is_active {
                return Err(LoadQuoteError::Validation(format!(
                    "business entity {business_id} is not active"
                )));
            }
        }

        let now = Utc::now();
        let cargo = Cargo {
            id: Uuid::new_v4(),
            business_entity_id: draft.business_entity_id,
            weight: draft.weight,
            volume: draft.volume,
            cargo_type: draft.cargo_type,
            value: draft.value,
            special_requirements: draft.special_requirements,
            status: CargoStatus::Pending,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        info!(cargo_id = %cargo.id, cargo_type = %cargo.cargo_type, "created cargo");
        self.cargo_repo.save(cargo).await
    }

    pub async fn get_cargo(&self, cargo_id: Uuid) -> Result<Cargo> {
        self.require_cargo(cargo_id).await
    }

    pub async fn list_cargo(&self, offset: u64, limit: u64) -> Result<CargoPage> {
        let items = self.cargo_repo.list(offset, limit).await?;
        let total = self.cargo_repo.count().await?;
        Ok(CargoPage { items, total, offset, limit })
    }

    /// Apply a partial update. A status change is guarded by the transition
    /// table, recorded in the history log and cascaded onto the route.
    pub async fn update_cargo(&self, cargo_id: Uuid, update: CargoUpdate) -> Result<Cargo> {
        let mut cargo = self.require_cargo(cargo_id).await?;
        let old_status = cargo.status;

        if let Some(weight) = update.weight {
            cargo.weight = weight;
        }
        if let Some(volume) = update.volume {
            cargo.volume = volume;
        }
        if let Some(cargo_type) = update.cargo_type {
            cargo.cargo_type = cargo_type;
        }
        if let Some(value) = update.value {
            cargo.value = value;
        }
        if let Some(requirements) = update.special_requirements {
            cargo.special_requirements = requirements;
        }

        let status_changed = match update.status {
            Some(new_status) if new_status != old_status => {
                ensure_cargo_transition(old_status, new_status)?;
                cargo.status = new_status;
                true
            }
            _ => false,
        };

        cargo.updated_at = Utc::now();
        let saved = self.cargo_repo.save(cargo).await?;

        if status_changed {
            self.cargo_repo
                .append_status_history(CargoStatusHistoryEntry {
                    id: Uuid::new_v4(),
                    cargo_id,
                    old_status,
                    new_status: saved.status,
                    trigger: StatusTrigger::ManualUpdate,
                    trigger_id: None,
                    timestamp: saved.updated_at,
                })
                .await?;
            self.cascade_route_status(&saved).await?;
        }

        Ok(saved)
    }

    /// Soft-delete a cargo. Cargo in transit cannot be deleted.
    pub async fn delete_cargo(&self, cargo_id: Uuid) -> Result<()> {
        let mut cargo = self.require_cargo(cargo_id).await?;
        if cargo.status == CargoStatus::InTransit {
            return Err(LoadQuoteError::Validation(
                "cannot delete cargo that is in transit".into(),
            ));
        }
        cargo.is_active = false;
        cargo.updated_at = Utc::now();
        self.cargo_repo.save(cargo).await?;
        Ok(())
    }

    /// History entries for a cargo, newest first.
    pub async fn get_status_history(
        &self,
        cargo_id: Uuid,
    ) -> Result<Vec<CargoStatusHistoryEntry>> {
        self.cargo_repo.status_history(cargo_id).await
    }

    /// Route status follows cargo status: in transit starts the route and
    /// its pickup event, delivery completes everything, cancellation
    /// cancels the route and all unfinished events.
    async fn cascade_route_status(&self, cargo: &Cargo) -> Result<()> {
        let Some(mut route) = self.route_repo.find_by_cargo_id(cargo.id).await? else {
            warn!(cargo_id = %cargo.id, "no route assigned, skipping status cascade");
            return Ok(());
        };
        let now = Utc::now();

        match cargo.status {
            CargoStatus::InTransit => {
                ensure_route_transition(route.status, RouteStatus::InProgress)?;
                route.status = RouteStatus::InProgress;
                for event in &mut route.timeline_events {
                    if event.event_type == "pickup"
                        && event.status == TimelineEventStatus::Pending
                    {
                        event.status = TimelineEventStatus::InProgress;
                        event.actual_time = Some(now);
                    }
                }
            }
            CargoStatus::Delivered => {
                ensure_route_transition(route.status, RouteStatus::Completed)?;
                route.status = RouteStatus::Completed;
                for event in &mut route.timeline_events {
                    if event.status != TimelineEventStatus::Completed {
                        event.status = TimelineEventStatus::Completed;
                        event.actual_time = Some(now);
                    }
                }
            }
            CargoStatus::Cancelled => {
                ensure_route_transition(route.status, RouteStatus::Cancelled)?;
                route.status = RouteStatus::Cancelled;
                for event in &mut route.timeline_events {
                    if event.status != TimelineEventStatus::Completed {
                        event.status = TimelineEventStatus::Cancelled;
                    }
                }
            }
            CargoStatus::Pending => return Ok(()),
        }

        info!(route_id = %route.id, route_status = %route.status, "cascaded route status");
        self.route_repo.save(route).await?;
        Ok(())
    }

    async fn require_cargo(&self, cargo_id: Uuid) -> Result<Cargo> {
        self.cargo_repo
            .find_by_id(cargo_id)
            .await?
            .ok_or_else(|| LoadQuoteError::not_found("cargo", cargo_id))
    }
}
