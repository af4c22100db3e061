//! Axum extractors for authentication.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{
        header::{AUTHORIZATION, LOCATION},
        request::Parts,
        StatusCode,
    },
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use bookmarks_core::auth::SessionId;
use bookmarks_core::images::User;
use chrono::Utc;

use crate::AuthState;

/// Builds the login redirect target for a request to `next`.
///
/// ```
/// use bookmarks_auth::login_redirect_url;
///
/// assert_eq!(
///     login_redirect_url("/account/login/", "/images/?page=2"),
///     "/account/login/?next=/images/%3Fpage%3D2"
/// );
/// ```
pub fn login_redirect_url(login_url: &str, next: &str) -> String {
    let encoded = urlencoding::encode(next).replace("%2F", "/");
    format!("{login_url}?next={encoded}")
}

/// Rejection for [`CurrentUser`].
#[derive(Debug)]
pub enum AuthRejection {
    /// No valid session: redirect (302) to this login URL.
    LoginRequired(String),
    /// The session or user store failed.
    LookupFailed(&'static str),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::LoginRequired(location) => {
                (StatusCode::FOUND, [(LOCATION, location)]).into_response()
            }
            AuthRejection::LookupFailed(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

/// Reads the session id from a `Bearer` header, falling back to the cookie.
fn session_id_from_parts(parts: &Parts, cookie_name: &str) -> Option<SessionId> {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|token| SessionId::new(token.to_string()));

    bearer.or_else(|| {
        CookieJar::from_headers(&parts.headers)
            .get(cookie_name)
            .map(|cookie| SessionId::new(cookie.value().to_string()))
    })
}

/// Resolves the user behind the request's session.
///
/// `Ok(None)` means anonymous: no session, an unknown or expired one, or a
/// session whose user no longer exists.
async fn resolve_user(parts: &Parts, auth: &AuthState) -> Result<Option<User>, &'static str> {
    let Some(session_id) = session_id_from_parts(parts, &auth.config.cookie_name) else {
        return Ok(None);
    };

    let session = match auth.sessions.find_session(&session_id).await {
        Ok(Some(session)) => session,
        Ok(None) => return Ok(None),
        Err(e) => {
            tracing::error!(error = %e, "Session lookup failed");
            return Err("Session lookup failed");
        }
    };

    if session.is_expired_at(Utc::now()) {
        return Ok(None);
    }

    auth.users.get_user(session.user_id).await.map_err(|e| {
        tracing::error!(error = %e, user_id = %session.user_id, "User lookup failed");
        "User lookup failed"
    })
}

/// Extractor for an authenticated user.
///
/// Anonymous requests are redirected to the login page with the requested
/// path in `next`.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        match resolve_user(parts, &auth_state).await {
            Ok(Some(user)) => Ok(CurrentUser(user)),
            Ok(None) => {
                let next = parts
                    .uri
                    .path_and_query()
                    .map(|pq| pq.as_str())
                    .unwrap_or("/");
                Err(AuthRejection::LoginRequired(login_redirect_url(
                    &auth_state.config.login_url,
                    next,
                )))
            }
            Err(message) => Err(AuthRejection::LookupFailed(message)),
        }
    }
}

/// Extractor for optionally authenticated user. Lookup failures count as anonymous.
pub struct OptionalUser(pub Option<User>);

impl<S> FromRequestParts<S> for OptionalUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        Ok(OptionalUser(
            resolve_user(parts, &auth_state).await.unwrap_or(None),
        ))
    }
}
