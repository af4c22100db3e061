mod error;
mod traits;

pub use error::{repository_error_to_status_code, RepositoryError, Result};
pub use traits::{ActionRepository, ImageRepository, LikeRepository, UserRepository};
