//! Application state shared by every request handler.
//!
//! Holds repository and stats trait objects; the concrete backends are
//! picked by feature flags in the factory modules at the bottom.

use std::sync::Arc;

use axum::extract::FromRef;

use bookmarks_auth::{AuthConfig, AuthState};
use bookmarks_core::auth::SessionRepository;
use bookmarks_core::stats::ImageStats;
use bookmarks_core::storage::{ActionRepository, ImageRepository, LikeRepository, UserRepository};

use crate::config::Config;

// Storage features: exactly one must be enabled
#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!("Cannot enable both 'sqlite' and 'inmemory' storage features");

#[cfg(not(any(feature = "inmemory", feature = "sqlite")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'sqlite'");

// Stats features: exactly one must be enabled
#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!("Cannot enable both 'memory' and 'redis' stats features");

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!("Must enable exactly one stats feature: 'memory' or 'redis'");

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub images: Arc<dyn ImageRepository>,
    pub users: Arc<dyn UserRepository>,
    pub likes: Arc<dyn LikeRepository>,
    pub actions: Arc<dyn ActionRepository>,
    /// View counters and ranking.
    pub stats: Arc<dyn ImageStats>,
    pub auth: AuthState,
    pub images_per_page: usize,
    pub ranking_size: usize,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl AppState {
    /// Wires one relational backend into every repository slot.
    fn build<R>(
        repo: Arc<R>,
        stats: Arc<dyn ImageStats>,
        sessions: Arc<dyn SessionRepository>,
        config: &Config,
        auth_config: AuthConfig,
    ) -> Self
    where
        R: ImageRepository + UserRepository + LikeRepository + ActionRepository + 'static,
    {
        let users: Arc<dyn UserRepository> = repo.clone();

        Self {
            images: repo.clone(),
            users: users.clone(),
            likes: repo.clone(),
            actions: repo,
            stats,
            auth: AuthState::new(sessions, users, auth_config),
            images_per_page: config.images_per_page,
            ranking_size: config.ranking_size,
        }
    }
}

// ============================================================================
// Factory functions for different backend combinations
// ============================================================================

#[cfg(feature = "redis")]
mod redis_sessions {
    use bookmarks_auth::SessionStore;
    use fred::prelude::*;

    /// Connects the session store to the same Redis as the stats backend.
    pub async fn session_store(url: &str) -> Result<SessionStore, anyhow::Error> {
        let redis_config = Config::from_url(url)?;
        let pool = Builder::from_config(redis_config).build_pool(4)?;
        pool.init().await?;
        Ok(SessionStore::new(pool))
    }
}

#[cfg(all(feature = "inmemory", feature = "memory"))]
mod inmemory_memory {
    use super::*;
    use crate::stats::MemoryStats;
    use crate::storage::InMemoryRepository;
    use bookmarks_auth::SessionStore;

    impl AppState {
        /// Creates AppState with in-memory storage, stats and sessions.
        /// Nothing survives a restart.
        pub async fn new(config: &Config, auth_config: AuthConfig) -> Result<Self, anyhow::Error> {
            Ok(Self::build(
                Arc::new(InMemoryRepository::new()),
                Arc::new(MemoryStats::new()),
                Arc::new(SessionStore::new()),
                config,
                auth_config,
            ))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "redis"))]
mod inmemory_redis {
    use super::*;
    use crate::stats::RedisStats;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and Redis stats and sessions.
        pub async fn new(config: &Config, auth_config: AuthConfig) -> Result<Self, anyhow::Error> {
            let stats = RedisStats::new(&config.redis_url).await?;
            let sessions = redis_sessions::session_store(&config.redis_url).await?;

            Ok(Self::build(
                Arc::new(InMemoryRepository::new()),
                Arc::new(stats),
                Arc::new(sessions),
                config,
                auth_config,
            ))
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "memory"))]
mod sqlite_memory {
    use super::*;
    use crate::stats::MemoryStats;
    use crate::storage::SqliteRepository;
    use bookmarks_auth::SessionStore;

    impl AppState {
        /// Creates AppState with SQLite storage and in-memory stats and sessions.
        pub async fn new(config: &Config, auth_config: AuthConfig) -> Result<Self, anyhow::Error> {
            let repo = SqliteRepository::new(&config.sqlite_path).await?;
            tracing::info!(path = %config.sqlite_path, "opened SQLite database");

            Ok(Self::build(
                Arc::new(repo),
                Arc::new(MemoryStats::new()),
                Arc::new(SessionStore::new()),
                config,
                auth_config,
            ))
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "redis"))]
mod sqlite_redis {
    use super::*;
    use crate::stats::RedisStats;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and Redis stats and sessions.
        pub async fn new(config: &Config, auth_config: AuthConfig) -> Result<Self, anyhow::Error> {
            let repo = SqliteRepository::new(&config.sqlite_path).await?;
            tracing::info!(path = %config.sqlite_path, "opened SQLite database");
            let stats = RedisStats::new(&config.redis_url).await?;
            let sessions = redis_sessions::session_store(&config.redis_url).await?;

            Ok(Self::build(
                Arc::new(repo),
                Arc::new(stats),
                Arc::new(sessions),
                config,
                auth_config,
            ))
        }
    }
}

// ============================================================================
// Test support
// ============================================================================

#[cfg(all(test, feature = "inmemory", feature = "memory"))]
mod test_support {
    use super::*;
    use crate::stats::MemoryStats;
    use crate::storage::InMemoryRepository;
    use bookmarks_auth::SessionStore;

    impl Default for AppState {
        fn default() -> Self {
            Self::build(
                Arc::new(InMemoryRepository::new()),
                Arc::new(MemoryStats::new()),
                Arc::new(SessionStore::new()),
                &Config::default(),
                AuthConfig::default(),
            )
        }
    }
}
