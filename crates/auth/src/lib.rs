//! Session authentication for the image bookmarks service.
//!
//! This crate provides:
//! - Session storage (in-memory, or Redis with the `redis` feature)
//! - Axum extractors that resolve the current user from the session cookie
//! - Logout and, with `dev-login`, a username-only login form

mod config;
mod error;
mod extractors;
mod handlers;
mod sessions;
mod state;

pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::{login_redirect_url, AuthRejection, CurrentUser, OptionalUser};
pub use handlers::auth_routes;
pub use sessions::SessionStore;
pub use state::AuthState;
