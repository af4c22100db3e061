mod error;
mod functions;
mod traits;
mod types;
mod validation;

pub use error::AuthError;
pub use functions::{
    calculate_expiry, generate_session_id, new_session, validate_username, MAX_USERNAME_LENGTH,
};
pub use traits::{Result, SessionRepository};
pub use types::{Session, SessionId};
pub use validation::{next_or, safe_next_path};
