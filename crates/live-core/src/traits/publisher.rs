//! Outbound event port

use async_trait::async_trait;

use crate::events::RoomEvent;
use crate::traits::RepoResult;

/// Delivers room events to connected clients
///
/// Delivery is best-effort: publishing to a room nobody watches is not an error.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an event, returning how many connections it was queued for
    async fn publish(&self, event: RoomEvent) -> RepoResult<usize>;
}
