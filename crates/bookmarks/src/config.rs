use std::env;

use bookmarks_core::images::DEFAULT_RANKING_SIZE;
use bookmarks_core::pagination::DEFAULT_PER_PAGE;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "bookmarks.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
    /// Images per list page (default: 8)
    pub images_per_page: usize,
    /// Number of images on the ranking page (default: 10)
    pub ranking_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sqlite_path: "bookmarks.db".to_string(),
            redis_url: "redis://localhost:6379".to_string(),
            images_per_page: DEFAULT_PER_PAGE,
            ranking_size: DEFAULT_RANKING_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "bookmarks.db")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `IMAGES_PER_PAGE` - Images per list page (default: 8)
    /// - `RANKING_SIZE` - Images on the ranking page (default: 10)
    ///
    /// Unparsable or zero numbers fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            sqlite_path: env::var("SQLITE_PATH").unwrap_or(defaults.sqlite_path),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            images_per_page: positive_from_env("IMAGES_PER_PAGE")
                .unwrap_or(defaults.images_per_page),
            ranking_size: positive_from_env("RANKING_SIZE").unwrap_or(defaults.ranking_size),
        }
    }
}

fn positive_from_env(name: &str) -> Option<usize> {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.sqlite_path, "bookmarks.db");
        assert_eq!(config.redis_url, "redis://localhost:6379");
        assert_eq!(config.images_per_page, 8);
        assert_eq!(config.ranking_size, 10);
    }

    #[test]
    fn test_positive_from_env_rejects_zero_and_garbage() {
        env::set_var("BOOKMARKS_TEST_ZERO", "0");
        env::set_var("BOOKMARKS_TEST_GARBAGE", "eight");
        env::set_var("BOOKMARKS_TEST_OK", " 12 ");

        assert_eq!(positive_from_env("BOOKMARKS_TEST_ZERO"), None);
        assert_eq!(positive_from_env("BOOKMARKS_TEST_GARBAGE"), None);
        assert_eq!(positive_from_env("BOOKMARKS_TEST_OK"), Some(12));
        assert_eq!(positive_from_env("BOOKMARKS_TEST_MISSING"), None);
    }
}
