//! Redis stats backend.
//!
//! View counters are plain integer keys; the ranking is a sorted set
//! shared by every instance pointing at the same Redis.

mod error;
mod stats;

pub use stats::RedisStats;
