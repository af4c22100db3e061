//! View counters and ranking: keys, errors and the store trait.

mod error;
mod keys;
mod traits;

pub use error::{stats_error_to_status_code, Result, StatsError};
pub use keys::{image_views_key, IMAGE_RANKING_KEY};
pub use traits::ImageStats;
