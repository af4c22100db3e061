use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bookmarks_core::stats::{stats_error_to_status_code, StatsError};
use bookmarks_core::storage::{repository_error_to_status_code, RepositoryError};

/// Handler error: any `anyhow::Error`, mapped to a status code by downcasting
/// to the core error types.
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        let code = if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            repository_error_to_status_code(repo_error)
        } else if let Some(stats_error) = self.0.downcast_ref::<StatsError>() {
            stats_error_to_status_code(stats_error)
        } else {
            500
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!(error = %self.0, status = %status_code, "request failed");
        }

        (status_code, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = AppError::from(RepositoryError::NotFound {
            entity_type: "Image",
            id: "x".to_string(),
        });
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_stats_connection_failure_maps_to_503() {
        let error = AppError::from(StatsError::ConnectionFailed("refused".to_string()));
        assert_eq!(error.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_stats_operation_failure_maps_to_500() {
        let error = AppError::from(StatsError::OperationFailed("WRONGTYPE".to_string()));
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_other_errors_are_500() {
        let error = AppError::from(anyhow::anyhow!("boom"));
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
