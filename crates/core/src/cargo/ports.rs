//! Port interfaces for cargo management.

use async_trait::async_trait;
use loadquote_domain::{Cargo, CargoStatusHistoryEntry, Result};
use uuid::Uuid;

/// Persistence port for cargo and its status history log.
#[async_trait]
pub trait CargoRepository: Send + Sync {
    async fn save(&self, cargo: Cargo) -> Result<Cargo>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Cargo>>;

    /// Append one history entry; entries are never updated or removed.
    async fn append_status_history(&self, entry: CargoStatusHistoryEntry) -> Result<()>;

    /// History entries for a cargo, ordered by timestamp descending.
    async fn status_history(&self, cargo_id: Uuid) -> Result<Vec<CargoStatusHistoryEntry>>;

    /// Active cargo, ordered by creation time descending.
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Cargo>>;

    async fn count(&self) -> Result<u64>;
}
