//! View counter and ranking backends.
//!
//! Concrete implementations of `bookmarks_core::stats::ImageStats`,
//! selected at compile time.
//!
//! # Feature Flags
//!
//! - `memory` (default): process-local counters behind a tokio `RwLock`
//! - `redis`: Redis counters (`INCR`) and a sorted set (`ZINCRBY`)
//!
//! Only one stats backend can be enabled at a time.

#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!(
    "Features 'memory' and 'redis' are mutually exclusive. \
    Enable only one stats backend at a time."
);

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!(
    "No stats backend selected. Enable 'memory' or 'redis' feature. \
    Example: cargo build -p bookmarks --features memory"
);

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

#[cfg(feature = "memory")]
pub use memory::MemoryStats;

#[cfg(feature = "redis")]
pub use redis_impl::RedisStats;
