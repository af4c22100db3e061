use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use bookmarks_core::stats::{image_views_key, ImageStats, Result};

/// Process-local view counters and ranking.
///
/// Counters are keyed the same way the Redis backend keys them so both
/// backends can be inspected alike while debugging.
#[derive(Debug, Clone, Default)]
pub struct MemoryStats {
    counters: Arc<RwLock<HashMap<String, u64>>>,
    ranking: Arc<RwLock<HashMap<Uuid, f64>>>,
}

impl MemoryStats {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageStats for MemoryStats {
    async fn incr_views(&self, image_id: Uuid) -> Result<u64> {
        let mut counters = self.counters.write().await;
        let views = counters.entry(image_views_key(image_id)).or_insert(0);
        *views = views.saturating_add(1);
        Ok(*views)
    }

    async fn views(&self, image_id: Uuid) -> Result<u64> {
        let counters = self.counters.read().await;
        Ok(counters
            .get(&image_views_key(image_id))
            .copied()
            .unwrap_or(0))
    }

    async fn incr_ranking(&self, image_id: Uuid) -> Result<()> {
        let mut ranking = self.ranking.write().await;
        *ranking.entry(image_id).or_insert(0.0) += 1.0;
        Ok(())
    }

    async fn top_ranked(&self, limit: usize) -> Result<Vec<Uuid>> {
        let ranking = self.ranking.read().await;
        let mut scored: Vec<(Uuid, f64)> = ranking.iter().map(|(id, s)| (*id, *s)).collect();

        // Score descending, then member descending (ZREVRANGE order)
        scored.sort_by(|(a_id, a), (b_id, b)| b.total_cmp(a).then_with(|| b_id.cmp(a_id)));

        Ok(scored.into_iter().take(limit).map(|(id, _)| id).collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_views_start_at_zero() {
        let stats = MemoryStats::new();
        assert_eq!(stats.views(Uuid::new_v4()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_incr_views_returns_new_total() {
        let stats = MemoryStats::new();
        let id = Uuid::new_v4();

        assert_eq!(stats.incr_views(id).await.unwrap(), 1);
        assert_eq!(stats.incr_views(id).await.unwrap(), 2);
        assert_eq!(stats.views(id).await.unwrap(), 2);
        assert_eq!(stats.views(Uuid::new_v4()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_top_ranked_orders_by_score() {
        let stats = MemoryStats::new();
        let low = Uuid::new_v4();
        let high = Uuid::new_v4();

        stats.incr_ranking(low).await.unwrap();
        for _ in 0..3 {
            stats.incr_ranking(high).await.unwrap();
        }

        assert_eq!(stats.top_ranked(10).await.unwrap(), vec![high, low]);
    }

    #[tokio::test]
    async fn test_top_ranked_respects_limit() {
        let stats = MemoryStats::new();
        for _ in 0..12 {
            stats.incr_ranking(Uuid::new_v4()).await.unwrap();
        }

        assert_eq!(stats.top_ranked(10).await.unwrap().len(), 10);
        assert!(stats.top_ranked(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ties_break_by_member_descending() {
        let stats = MemoryStats::new();
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);

        stats.incr_ranking(a).await.unwrap();
        stats.incr_ranking(b).await.unwrap();

        assert_eq!(stats.top_ranked(10).await.unwrap(), vec![b, a]);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let stats = MemoryStats::new();
        let clone = stats.clone();
        let id = Uuid::new_v4();

        clone.incr_views(id).await.unwrap();

        assert_eq!(stats.views(id).await.unwrap(), 1);
    }
}
