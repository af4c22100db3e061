use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use bookmarks_core::auth::{Result, Session, SessionId, SessionRepository};

/// Process-local session map. Clones share the same sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionRepository for SessionStore {
    async fn save_session(&self, session: &Session) -> Result<()> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        // Nothing else evicts, so expired sessions are dropped on every login.
        sessions.retain(|_, s| !s.is_expired_at(now));
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn find_session(&self, id: &SessionId) -> Result<Option<Session>> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn revoke_session(&self, id: &SessionId) -> Result<()> {
        self.sessions.write().await.remove(id);
        Ok(())
    }

    async fn revoke_user_sessions(&self, user_id: Uuid) -> Result<()> {
        self.sessions
            .write()
            .await
            .retain(|_, s| s.user_id != user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bookmarks_core::auth::new_session;
    use chrono::Duration;

    use super::*;

    fn login(user_id: Uuid) -> Session {
        new_session(user_id, Utc::now(), Duration::days(14))
    }

    #[tokio::test]
    async fn test_saved_session_is_found_by_cookie_value() {
        let store = SessionStore::new();
        let session = login(Uuid::new_v4());
        store.save_session(&session).await.unwrap();

        let cookie_value = SessionId::from(session.id.as_str());
        assert_eq!(store.find_session(&cookie_value).await.unwrap(), Some(session));
        assert_eq!(store.find_session(&"forged".into()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let store = SessionStore::new();
        let session = login(Uuid::new_v4());
        store.save_session(&session).await.unwrap();

        store.revoke_session(&session.id).await.unwrap();
        store.revoke_session(&session.id).await.unwrap();
        assert_eq!(store.find_session(&session.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_revoke_user_sessions_keeps_other_users() {
        let store = SessionStore::new();
        let (ana, ben) = (Uuid::new_v4(), Uuid::new_v4());
        let phone = login(ana);
        let laptop = login(ana);
        let other = login(ben);
        for s in [&phone, &laptop, &other] {
            store.save_session(s).await.unwrap();
        }

        store.revoke_user_sessions(ana).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert!(store.find_session(&other.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_expired_sessions_are_evicted_on_save() {
        let store = SessionStore::new();
        let stale = new_session(Uuid::new_v4(), Utc::now() - Duration::days(15), Duration::days(14));
        store.save_session(&stale).await.unwrap();
        store.save_session(&login(Uuid::new_v4())).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.find_session(&stale.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_sessions() {
        let store = SessionStore::new();
        let handle = store.clone();
        let session = login(Uuid::new_v4());
        handle.save_session(&session).await.unwrap();

        assert!(store.find_session(&session.id).await.unwrap().is_some());
    }
}
