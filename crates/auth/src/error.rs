use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bookmarks_core::storage::{repository_error_to_status_code, RepositoryError};
use thiserror::Error;

/// Auth errors for the bookmarks_auth crate.
///
/// Wraps the core `AuthError` and the repository errors raised while
/// resolving users.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Core(#[from] bookmarks_core::auth::AuthError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        use bookmarks_core::auth::AuthError as CoreError;

        let (status, message) = match &self {
            AuthError::Core(CoreError::InvalidUsername(_)) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AuthError::Core(CoreError::Storage(_)) => {
                tracing::error!(error = %self, "Session storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AuthError::Repository(err) => {
                tracing::error!(error = %err, "User repository error");
                let status = StatusCode::from_u16(repository_error_to_status_code(err))
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, "Internal server error".to_string())
            }
        };

        (status, message).into_response()
    }
}
