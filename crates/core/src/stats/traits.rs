use async_trait::async_trait;
use uuid::Uuid;

use super::Result;

/// Store for per-image view counters and the global views ranking.
///
/// Counters live outside the relational store; an image row never holds
/// its own view count.
#[async_trait]
pub trait ImageStats: Send + Sync {
    /// Increments the view counter of an image, returning the new total.
    async fn incr_views(&self, image_id: Uuid) -> Result<u64>;

    /// Current view count of an image (0 if never viewed).
    async fn views(&self, image_id: Uuid) -> Result<u64>;

    /// Adds 1 to the image's score in the ranking.
    async fn incr_ranking(&self, image_id: Uuid) -> Result<()>;

    /// The `limit` highest-scored image IDs, best first.
    ///
    /// Ties are broken by member, descending.
    async fn top_ranked(&self, limit: usize) -> Result<Vec<Uuid>>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<()>;
}
