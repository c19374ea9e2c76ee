//! Offer lifecycle - pricing, enhancement, status audit and finalization.
//!
//! Finalization is a saga: three coupled aggregates (cargo, route, offer)
//! advance in intent atomically but in implementation as separate writes,
//! with best-effort compensation on partial failure. No locking guards
//! concurrent finalization of the same offer; the cargo history entry
//! written by the saga survives compensation. A single transactional write
//! would remove both gaps, but the current contract is the compensating
//! rollback described here.

pub mod ports;

use std::sync::Arc;

use chrono::Utc;
use loadquote_domain::{
    Cargo, CargoStatus, CargoStatusHistoryEntry, CostBreakdown, LoadQuoteError, Offer,
    OfferStatus, OfferStatusEvent, Result, Route, RouteStatus, StatusTrigger,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::cargo::ports::CargoRepository;
use crate::costing::ports::RouteRepository;
use crate::status::{ensure_offer_transition, ensure_route_transition};
use ports::{ContentEnhancer, OfferRepository};

/// What the saga has already mutated, for compensation on failure.
#[derive(Debug, Default)]
struct SagaProgress {
    cargo_advanced: bool,
    route_advanced: bool,
}

/// Service managing offers from pricing through finalization.
pub struct OfferService {
    offer_repo: Arc<dyn OfferRepository>,
    cargo_repo: Arc<dyn CargoRepository>,
    route_repo: Arc<dyn RouteRepository>,
    enhancer: Arc<dyn ContentEnhancer>,
}

impl OfferService {
    pub fn new(
        offer_repo: Arc<dyn OfferRepository>,
        cargo_repo: Arc<dyn CargoRepository>,
        route_repo: Arc<dyn RouteRepository>,
        enhancer: Arc<dyn ContentEnhancer>,
    ) -> Self {
        Self { offer_repo, cargo_repo, route_repo, enhancer }
    }

    /// Price an offer over a cost breakdown snapshot.
    ///
    /// Only negative margins are rejected; the nominal 100% cap is not
    /// enforced here.
    pub async fn create_offer(
        &self,
        route: &Route,
        breakdown: &CostBreakdown,
        margin_percentage: Decimal,
        enhance: bool,
    ) -> Result<Offer> {
        if margin_percentage < Decimal::ZERO {
            return Err(LoadQuoteError::Validation(
                "margin percentage cannot be negative".into(),
            ));
        }

        let final_price =
            breakdown.total_cost * (Decimal::ONE + margin_percentage / dec!(100));

        let mut offer = Offer {
            id: Uuid::new_v4(),
            route_id: route.id,
            cost_breakdown_id: breakdown.id,
            margin_percentage,
            final_price,
            ai_content: None,
            fun_fact: None,
            status: OfferStatus::Draft,
            created_at: Utc::now(),
            finalized_at: None,
        };

        if enhance {
            let enhanced = self.enhancer.enhance_offer(&offer).await?;
            offer.ai_content = Some(enhanced.content);
            offer.fun_fact = Some(enhanced.fun_fact);
        }

        info!(offer_id = %offer.id, route_id = %route.id, %final_price, "created offer");
        self.offer_repo.save(offer).await
    }

    /// Enrich an existing offer with generated content and persist it.
    pub async fn enhance_offer(&self, offer_id: Uuid) -> Result<Offer> {
        let mut offer = self.require_offer(offer_id).await?;
        let enhanced = self.enhancer.enhance_offer(&offer).await?;
        offer.ai_content = Some(enhanced.content);
        offer.fun_fact = Some(enhanced.fun_fact);
        self.offer_repo.save(offer).await
    }

    pub async fn get_offer(&self, offer_id: Uuid) -> Result<Offer> {
        self.require_offer(offer_id).await
    }

    /// Manual status transition with an audit entry.
    pub async fn update_status(
        &self,
        offer_id: Uuid,
        new_status: OfferStatus,
        comment: Option<String>,
    ) -> Result<Offer> {
        let mut offer = self.require_offer(offer_id).await?;
        let old_status = offer.status;
        ensure_offer_transition(old_status, new_status)?;

        let now = Utc::now();
        offer.status = new_status;
        if new_status == OfferStatus::Finalized && offer.finalized_at.is_none() {
            offer.finalized_at = Some(now);
        }
        let saved = self.offer_repo.save(offer).await?;

        self.offer_repo
            .append_status_event(OfferStatusEvent {
                id: Uuid::new_v4(),
                offer_id,
                old_status,
                new_status,
                trigger: StatusTrigger::ManualUpdate,
                comment,
                timestamp: now,
            })
            .await?;

        Ok(saved)
    }

    /// Audit entries for an offer, newest first.
    pub async fn get_status_history(&self, offer_id: Uuid) -> Result<Vec<OfferStatusEvent>> {
        self.offer_repo.status_history(offer_id).await
    }

    /// Finalize an offer: advance cargo, route and offer through their
    /// lifecycles, compensating on partial failure.
    pub async fn finalize_offer(&self, offer_id: Uuid) -> Result<Offer> {
        let offer = self.require_offer(offer_id).await?;
        if offer.status != OfferStatus::Draft {
            return Err(LoadQuoteError::Validation(format!(
                "cannot finalize offer in {} state",
                offer.status
            )));
        }

        let route = self
            .route_repo
            .find_by_id(offer.route_id)
            .await?
            .ok_or_else(|| LoadQuoteError::not_found("route", offer.route_id))?;
        let cargo_id = route.cargo_id.ok_or_else(|| {
            LoadQuoteError::Validation(format!(
                "route {} has no cargo assigned",
                route.id
            ))
        })?;
        let cargo = self
            .cargo_repo
            .find_by_id(cargo_id)
            .await?
            .ok_or_else(|| LoadQuoteError::not_found("cargo", cargo_id))?;
        if cargo.status != CargoStatus::Pending {
            return Err(LoadQuoteError::Validation(format!(
                "cannot finalize offer: cargo is not in pending state (current status: {})",
                cargo.status
            )));
        }

        let mut progress = SagaProgress::default();
        match self.advance_aggregates(&offer, &route, &cargo, &mut progress).await {
            Ok(finalized) => {
                info!(offer_id = %offer_id, "offer finalized");
                Ok(finalized)
            }
            Err(err) => {
                warn!(offer_id = %offer_id, error = %err, "finalization failed, compensating");
                if let Err(rollback_err) = self.compensate(&progress, &cargo, &route).await {
                    error!(
                        offer_id = %offer_id,
                        error = %rollback_err,
                        "saga compensation failed"
                    );
                    return Err(LoadQuoteError::SagaCompensation(format!(
                        "finalization failed ({err}); rollback also failed: {rollback_err}"
                    )));
                }
                Err(err)
            }
        }
    }

    /// The forward path of the saga, in strict order: cargo, route, offer.
    async fn advance_aggregates(
        &self,
        offer: &Offer,
        route: &Route,
        cargo: &Cargo,
        progress: &mut SagaProgress,
    ) -> Result<Offer> {
        let now = Utc::now();

        let mut moving_cargo = cargo.clone();
        moving_cargo.status = CargoStatus::InTransit;
        moving_cargo.updated_at = now;
        self.cargo_repo.save(moving_cargo).await?;
        progress.cargo_advanced = true;

        // Appended before the remaining writes; compensation does not remove
        // this entry, so a rolled-back saga leaves it behind.
        self.cargo_repo
            .append_status_history(CargoStatusHistoryEntry {
                id: Uuid::new_v4(),
                cargo_id: cargo.id,
                old_status: CargoStatus::Pending,
                new_status: CargoStatus::InTransit,
                trigger: StatusTrigger::OfferFinalization,
                trigger_id: Some(offer.id.to_string()),
                timestamp: now,
            })
            .await?;

        ensure_route_transition(route.status, RouteStatus::Planned)?;
        let mut planned_route = route.clone();
        planned_route.status = RouteStatus::Planned;
        self.route_repo.save(planned_route).await?;
        progress.route_advanced = true;

        let mut finalized = offer.clone();
        finalized.status = OfferStatus::Finalized;
        finalized.finalized_at = Some(now);
        self.offer_repo.save(finalized).await
    }

    /// Best-effort rollback of whatever the forward path already wrote.
    async fn compensate(
        &self,
        progress: &SagaProgress,
        cargo: &Cargo,
        route: &Route,
    ) -> Result<()> {
        if progress.cargo_advanced {
            let mut reverted = cargo.clone();
            reverted.status = CargoStatus::Pending;
            reverted.updated_at = Utc::now();
            self.cargo_repo.save(reverted).await?;
        }
        if progress.route_advanced {
            let mut reverted = route.clone();
            reverted.status = RouteStatus::Draft;
            self.route_repo.save(reverted).await?;
        }
        Ok(())
    }

    async fn require_offer(&self, offer_id: Uuid) -> Result<Offer> {
        self.offer_repo
            .find_by_id(offer_id)
            .await?
            .ok_or_else(|| LoadQuoteError::not_found("offer", offer_id))
    }
}
