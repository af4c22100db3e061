use std::time::Duration;

use axum::{
    http::StatusCode,
    routing::{any, get},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use bookmarks_auth::auth_routes;

use crate::{
    handlers::{
        health::{healthz, livez},
        images::{
            image_create, image_create_form, image_detail, image_like, image_list, image_ranking,
            root,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let auth = state.auth.clone();

    Router::new()
        .route("/", get(root))
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .route("/images/", get(image_list))
        .route("/images/create/", get(image_create_form).post(image_create))
        .route("/images/detail/{id}/{slug}/", get(image_detail))
        // The handler answers 405 itself, after the AJAX and login checks
        .route("/images/like/", any(image_like))
        .route("/images/ranking/", get(image_ranking))
        .with_state(state)
        .merge(auth_routes().with_state(auth))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
}
