//! Redis view counters and ranking.
//!
//! `INCR image:{id}:views` and `ZINCRBY image_ranking 1 {id}` are two
//! separate commands. If the second one fails the detail request fails
//! too, and the counter stays one ahead of the ranking score. Nothing
//! reads both values expecting them to match, so the drift is harmless.

use async_trait::async_trait;
use redis::AsyncCommands;
use uuid::Uuid;

use bookmarks_core::images::parse_ranked_ids;
use bookmarks_core::stats::{image_views_key, ImageStats, Result, IMAGE_RANKING_KEY};

use super::error::map_redis_error;

/// Redis stats backend using a connection manager for reconnects.
pub struct RedisStats {
    conn: redis::aio::ConnectionManager,
}

impl RedisStats {
    /// Connects to Redis.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `StatsError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl ImageStats for RedisStats {
    async fn incr_views(&self, image_id: Uuid) -> Result<u64> {
        let mut conn = self.conn.clone();
        conn.incr(image_views_key(image_id), 1u64)
            .await
            .map_err(map_redis_error)
    }

    async fn views(&self, image_id: Uuid) -> Result<u64> {
        let mut conn = self.conn.clone();
        let views: Option<u64> = conn
            .get(image_views_key(image_id))
            .await
            .map_err(map_redis_error)?;
        Ok(views.unwrap_or(0))
    }

    async fn incr_ranking(&self, image_id: Uuid) -> Result<()> {
        let mut conn = self.conn.clone();
        let _score: f64 = conn
            .zincr(IMAGE_RANKING_KEY, image_id.to_string(), 1)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }

    async fn top_ranked(&self, limit: usize) -> Result<Vec<Uuid>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut conn = self.conn.clone();
        let stop = isize::try_from(limit).unwrap_or(isize::MAX) - 1;
        let members: Vec<String> = conn
            .zrevrange(IMAGE_RANKING_KEY, 0, stop)
            .await
            .map_err(map_redis_error)?;

        Ok(parse_ranked_ids(members))
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }
}
