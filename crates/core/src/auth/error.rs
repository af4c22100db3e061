use thiserror::Error;

/// Failures of the login and session layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The submitted username was rejected by `validate_username`.
    #[error("invalid username: {0}")]
    InvalidUsername(String),

    /// The session backend could not be reached or returned garbage.
    #[error("session store error: {0}")]
    Storage(String),
}
