use thiserror::Error;

/// Errors raised by the view-counter and ranking store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("Stats store connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Stats store operation failed: {0}")]
    OperationFailed(String),
    #[error("Invalid stats value: {0}")]
    InvalidValue(String),
}

/// Result type for stats operations.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Maps a [`StatsError`] to an HTTP status code.
///
/// Connection failures are 503, everything else is 500.
pub fn stats_error_to_status_code(error: &StatsError) -> u16 {
    match error {
        StatsError::ConnectionFailed(_) => 503,
        StatsError::OperationFailed(_) | StatsError::InvalidValue(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failed_display() {
        let error = StatsError::ConnectionFailed("refused".to_string());
        assert_eq!(error.to_string(), "Stats store connection failed: refused");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            stats_error_to_status_code(&StatsError::ConnectionFailed("x".into())),
            503
        );
        assert_eq!(
            stats_error_to_status_code(&StatsError::OperationFailed("x".into())),
            500
        );
        assert_eq!(
            stats_error_to_status_code(&StatsError::InvalidValue("x".into())),
            500
        );
    }
}
