use chrono::{DateTime, Duration, Utc};
use rand::{distr::Alphanumeric, Rng};
use uuid::Uuid;

use super::{AuthError, Session, SessionId};

/// Maximum accepted username length.
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Generate a cryptographically random session ID.
pub fn generate_session_id() -> SessionId {
    let id: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    SessionId::new(id)
}

/// Calculate session expiry from creation time and TTL.
///
/// Saturates at the latest representable instant instead of overflowing.
pub fn calculate_expiry(created_at: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    created_at
        .checked_add_signed(ttl)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Build a new session for `user_id` that lives for `ttl`.
pub fn new_session(user_id: Uuid, now: DateTime<Utc>, ttl: Duration) -> Session {
    Session {
        id: generate_session_id(),
        user_id,
        created_at: now,
        expires_at: calculate_expiry(now, ttl),
    }
}

/// Validate and trim a username.
///
/// Usernames are 1 to 150 characters of letters, digits and `@.+-_`.
pub fn validate_username(raw: &str) -> Result<String, AuthError> {
    let username = raw.trim();

    if username.is_empty() {
        return Err(AuthError::InvalidUsername("username is required".to_string()));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(AuthError::InvalidUsername(format!(
            "username must be at most {MAX_USERNAME_LENGTH} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err(AuthError::InvalidUsername(
            "username may only contain letters, digits and @/./+/-/_".to_string(),
        ));
    }

    Ok(username.to_string())
}
