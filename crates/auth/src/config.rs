use std::time::Duration;

/// Default session lifetime.
const DEFAULT_SESSION_TTL_DAYS: u64 = 14;

const SECONDS_PER_DAY: u64 = 86_400;

/// `days` as a duration, `None` when it does not fit.
fn ttl_from_days(days: u64) -> Option<Duration> {
    days.checked_mul(SECONDS_PER_DAY).map(Duration::from_secs)
}

/// Session and login configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub session_ttl: Duration,
    pub cookie_name: String,
    pub cookie_secure: bool,
    /// Where anonymous users are sent when a page requires login.
    pub login_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_DAYS * SECONDS_PER_DAY),
            cookie_name: "sessionid".to_string(),
            cookie_secure: true,
            login_url: "/account/login/".to_string(),
        }
    }
}

impl AuthConfig {
    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SESSION_TTL_DAYS`: Session TTL in days (default: 14)
    /// - `COOKIE_SECURE`: Whether to set the secure flag on cookies (default: true)
    /// - `LOGIN_URL`: Login page path (default: `/account/login/`)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let session_ttl = std::env::var("SESSION_TTL_DAYS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .and_then(ttl_from_days)
            .unwrap_or(defaults.session_ttl);

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(defaults.cookie_secure);

        let login_url = std::env::var("LOGIN_URL")
            .ok()
            .filter(|s| s.starts_with('/'))
            .unwrap_or(defaults.login_url);

        Self {
            session_ttl,
            cookie_secure,
            login_url,
            ..defaults
        }
    }

    /// Session TTL as a chrono duration.
    ///
    /// Falls back to the default lifetime when the TTL is beyond what chrono
    /// can represent.
    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        i64::try_from(self.session_ttl.as_secs())
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or_else(|| chrono::Duration::days(DEFAULT_SESSION_TTL_DAYS as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = AuthConfig::default();
        assert_eq!(config.session_ttl, Duration::from_secs(14 * 86_400));
        assert_eq!(config.cookie_name, "sessionid");
        assert!(config.cookie_secure);
        assert_eq!(config.login_url, "/account/login/");
    }

    #[test]
    fn test_session_ttl_chrono() {
        let config = AuthConfig {
            session_ttl: Duration::from_secs(3600),
            ..AuthConfig::default()
        };
        assert_eq!(config.session_ttl_chrono(), chrono::Duration::hours(1));
    }

    #[test]
    fn test_ttl_from_days_rejects_overflow() {
        assert_eq!(ttl_from_days(1), Some(Duration::from_secs(86_400)));
        assert_eq!(ttl_from_days(u64::MAX), None);
    }

    #[test]
    fn test_huge_ttl_falls_back_to_default() {
        let config = AuthConfig {
            session_ttl: ttl_from_days(1_000_000_000_000).unwrap(),
            ..AuthConfig::default()
        };
        assert_eq!(config.session_ttl_chrono(), chrono::Duration::days(14));
    }
}
