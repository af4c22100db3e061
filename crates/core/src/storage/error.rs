use thiserror::Error;

/// Failures of the relational store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    /// A stored row or a request value could not be interpreted.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// HTTP status for a repository failure.
///
/// Missing rows are 404, duplicates 409, bad data 400, an unreachable
/// database 503 and any other query failure 500.
///
/// ```
/// use bookmarks_core::storage::{repository_error_to_status_code, RepositoryError};
///
/// let missing = RepositoryError::not_found("Image", "3f1c");
/// assert_eq!(repository_error_to_status_code(&missing), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::InvalidData(_) => 400,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) => 500,
    }
}
