use async_trait::async_trait;
use bookmarks_core::auth::{AuthError, Result, Session, SessionId, SessionRepository};
use chrono::Utc;
use fred::prelude::*;
use uuid::Uuid;

fn session_key(id: &str) -> String {
    format!("session:{id}")
}

fn user_index_key(user_id: Uuid) -> String {
    format!("user_sessions:{user_id}")
}

fn store_error(e: impl std::fmt::Display) -> AuthError {
    AuthError::Storage(e.to_string())
}

/// Sessions kept in Redis.
///
/// Each session is a JSON string under `session:{id}` that expires with the
/// session itself. `user_sessions:{user_id}` is a set of the user's session
/// ids so a user can be logged out everywhere.
#[derive(Clone)]
pub struct SessionStore {
    pool: Pool,
}

impl SessionStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SessionStore {
    async fn save_session(&self, session: &Session) -> Result<()> {
        let ttl = session.seconds_left(Utc::now());
        if ttl == 0 {
            return Ok(());
        }
        let json = serde_json::to_string(session).map_err(store_error)?;

        self.pool
            .set::<(), _, _>(
                session_key(session.id.as_str()),
                json,
                Some(Expiration::EX(ttl as i64)),
                None,
                false,
            )
            .await
            .map_err(store_error)?;
        self.pool
            .sadd::<(), _, _>(user_index_key(session.user_id), session.id.as_str())
            .await
            .map_err(store_error)
    }

    async fn find_session(&self, id: &SessionId) -> Result<Option<Session>> {
        let json: Option<String> = self
            .pool
            .get(session_key(id.as_str()))
            .await
            .map_err(store_error)?;

        match json {
            Some(json) => serde_json::from_str(&json).map(Some).map_err(store_error),
            None => Ok(None),
        }
    }

    async fn revoke_session(&self, id: &SessionId) -> Result<()> {
        if let Some(session) = self.find_session(id).await? {
            self.pool
                .srem::<(), _, _>(user_index_key(session.user_id), id.as_str())
                .await
                .map_err(store_error)?;
        }
        self.pool
            .del::<(), _>(session_key(id.as_str()))
            .await
            .map_err(store_error)
    }

    async fn revoke_user_sessions(&self, user_id: Uuid) -> Result<()> {
        let index = user_index_key(user_id);
        let ids: Vec<String> = self.pool.smembers(&index).await.map_err(store_error)?;

        let mut keys: Vec<String> = ids.iter().map(|id| session_key(id)).collect();
        keys.push(index);
        self.pool.del::<(), _>(keys).await.map_err(store_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(session_key("abc"), "session:abc");
        assert_eq!(
            user_index_key(Uuid::nil()),
            "user_sessions:00000000-0000-0000-0000-000000000000"
        );
    }
}
