use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque token stored in the `sessionid` cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A logged-in user's session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// A session stops being valid at the instant it expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Whole seconds left before expiry, zero once expired.
    pub fn seconds_left(&self, now: DateTime<Utc>) -> u64 {
        (self.expires_at - now).num_seconds().max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn session_expiring_in(seconds: i64, now: DateTime<Utc>) -> Session {
        Session {
            id: SessionId::from("abc"),
            user_id: Uuid::nil(),
            created_at: now,
            expires_at: now + Duration::seconds(seconds),
        }
    }

    #[test]
    fn test_session_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&SessionId::from("tok")).unwrap();
        assert_eq!(json, r#""tok""#);
        assert_eq!(SessionId::from("tok").to_string(), "tok");
    }

    #[test]
    fn test_seconds_left() {
        let now = Utc::now();
        assert_eq!(session_expiring_in(90, now).seconds_left(now), 90);
        assert_eq!(session_expiring_in(-5, now).seconds_left(now), 0);
    }

    #[test]
    fn test_expired_at_boundary() {
        let now = Utc::now();
        assert!(session_expiring_in(0, now).is_expired_at(now));
        assert!(!session_expiring_in(1, now).is_expired_at(now));
    }
}
