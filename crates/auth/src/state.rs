use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, SameSite};
use bookmarks_core::auth::{Session, SessionRepository};
use bookmarks_core::storage::UserRepository;
use chrono::Utc;

use crate::config::AuthConfig;

/// What the extractors and account routes need. The application state
/// hands it out through `FromRef`.
#[derive(Clone)]
pub struct AuthState {
    pub sessions: Arc<dyn SessionRepository>,
    pub users: Arc<dyn UserRepository>,
    pub config: AuthConfig,
}

impl AuthState {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        users: Arc<dyn UserRepository>,
        config: AuthConfig,
    ) -> Self {
        Self {
            sessions,
            users,
            config,
        }
    }

    /// The `sessionid` cookie carrying `session`, living as long as the session.
    pub fn session_cookie(&self, session: &Session) -> Cookie<'static> {
        let max_age = session.seconds_left(Utc::now()) as i64;
        Cookie::build((self.config.cookie_name.clone(), session.id.to_string()))
            .path("/")
            .http_only(true)
            .secure(self.config.cookie_secure)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(max_age))
            .build()
    }

    /// Template for removing the session cookie from a `CookieJar`.
    pub fn cleared_session_cookie(&self) -> Cookie<'static> {
        Cookie::build(self.config.cookie_name.clone()).path("/").build()
    }
}
