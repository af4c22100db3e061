use async_trait::async_trait;
use uuid::Uuid;

use super::{AuthError, Session, SessionId};

pub type Result<T> = std::result::Result<T, AuthError>;

/// Backend that keeps login sessions between requests.
///
/// Lookups return `Ok(None)` for unknown ids; expiry is checked by the caller
/// with [`Session::is_expired_at`]. Revoking an unknown id is not an error.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn save_session(&self, session: &Session) -> Result<()>;

    async fn find_session(&self, id: &SessionId) -> Result<Option<Session>>;

    async fn revoke_session(&self, id: &SessionId) -> Result<()>;

    /// Logs `user_id` out everywhere.
    async fn revoke_user_sessions(&self, user_id: Uuid) -> Result<()>;
}
