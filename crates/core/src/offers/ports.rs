//! Port interfaces for the offer lifecycle.

use async_trait::async_trait;
use loadquote_domain::{Offer, OfferStatusEvent, Result};
use uuid::Uuid;

/// Persistence port for offers and their status audit log.
#[async_trait]
pub trait OfferRepository: Send + Sync {
    async fn save(&self, offer: Offer) -> Result<Offer>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>>;

    /// Append one audit entry; entries are never updated or removed.
    async fn append_status_event(&self, event: OfferStatusEvent) -> Result<()>;

    /// Audit entries for an offer, ordered by timestamp descending.
    async fn status_history(&self, offer_id: Uuid) -> Result<Vec<OfferStatusEvent>>;
}

/// Generated descriptive content for an offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancedContent {
    pub content: String,
    pub fun_fact: String,
}

/// External content-enhancement collaborator.
///
/// A failure here surfaces as a rejected request, never a silent skip.
#[async_trait]
pub trait ContentEnhancer: Send + Sync {
    async fn enhance_offer(&self, offer: &Offer) -> Result<EnhancedContent>;
}
