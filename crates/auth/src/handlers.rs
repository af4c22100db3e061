//! HTTP handlers for account routes.

use axum::{
    extract::State,
    response::Redirect,
    routing::post,
    Router,
};
use axum_extra::extract::CookieJar;
use bookmarks_core::auth::SessionId;

use crate::error::AuthError;
use crate::AuthState;

/// Creates the account router.
///
/// Routes:
/// - `POST /account/logout/` - End the current session
/// - `GET /account/login/` - Username login form (`dev-login` feature)
/// - `POST /account/login/` - Log in, creating the user if needed (`dev-login` feature)
pub fn auth_routes() -> Router<AuthState> {
    let router = Router::new().route("/account/logout/", post(logout));

    #[cfg(feature = "dev-login")]
    let router = router.route(
        "/account/login/",
        axum::routing::get(dev_login::login_form).post(dev_login::login),
    );

    router
}

async fn logout(
    State(state): State<AuthState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AuthError> {
    if let Some(cookie) = jar.get(&state.config.cookie_name) {
        let session_id = SessionId::new(cookie.value().to_string());
        state.sessions.revoke_session(&session_id).await?;
        tracing::info!("Session ended");
    }

    let jar = jar.remove(state.cleared_session_cookie());
    Ok((jar, Redirect::to(&state.config.login_url)))
}

#[cfg(feature = "dev-login")]
mod dev_login {
    use axum::{
        extract::{Query, State},
        http::StatusCode,
        response::{Html, IntoResponse, Redirect, Response},
        Form,
    };
    use axum_extra::extract::CookieJar;
    use bookmarks_core::auth::{new_session, next_or, validate_username, AuthError as CoreError};
    use bookmarks_core::images::User;
    use chrono::Utc;
    use serde::Deserialize;

    use crate::error::AuthError;
    use crate::AuthState;

    /// Where users land after login when no `next` is given.
    const DEFAULT_LOGIN_REDIRECT: &str = "/images/";

    #[derive(Debug, Default, Deserialize)]
    pub struct LoginQuery {
        pub next: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct LoginForm {
        #[serde(default)]
        pub username: String,
        pub next: Option<String>,
    }

    fn html_escape(s: &str) -> String {
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    fn login_page(next: Option<&str>, username: &str, error: Option<&str>) -> String {
        let error = error
            .map(|e| format!(r#"<p class="error">{}</p>"#, html_escape(e)))
            .unwrap_or_default();

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <title>Log in (DEV ONLY)</title>
</head>
<body>
    <h1>Log in</h1>
    {error}
    <form method="post" action="/account/login/">
        <input type="hidden" name="next" value="{next}" />
        <label for="username">Username</label>
        <input id="username" type="text" name="username" value="{username}" autofocus />
        <button type="submit">Log in</button>
    </form>
</body>
</html>"#,
            next = html_escape(next.unwrap_or("")),
            username = html_escape(username),
        )
    }

    pub async fn login_form(Query(query): Query<LoginQuery>) -> Html<String> {
        Html(login_page(query.next.as_deref(), "", None))
    }

    pub async fn login(
        State(state): State<AuthState>,
        jar: CookieJar,
        Form(form): Form<LoginForm>,
    ) -> Result<Response, AuthError> {
        let username = match validate_username(&form.username) {
            Ok(username) => username,
            Err(CoreError::InvalidUsername(message)) => {
                let page = login_page(form.next.as_deref(), &form.username, Some(&message));
                return Ok((StatusCode::BAD_REQUEST, Html(page)).into_response());
            }
            Err(e) => return Err(e.into()),
        };

        let user = match state.users.get_user_by_username(&username).await? {
            Some(user) => user,
            None => {
                let user = User::new(username);
                state.users.create_user(&user).await?;
                tracing::info!(user_id = %user.id, username = %user.username, "User created");
                user
            }
        };

        let session = new_session(user.id, Utc::now(), state.config.session_ttl_chrono());
        state.sessions.save_session(&session).await?;
        tracing::info!(user_id = %user.id, "Session started");

        let cookie = state.session_cookie(&session);

        let target = next_or(form.next.as_deref(), DEFAULT_LOGIN_REDIRECT).to_string();
        Ok((jar.add(cookie), Redirect::to(&target)).into_response())
    }
}
