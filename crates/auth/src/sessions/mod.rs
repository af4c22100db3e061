//! Where login sessions live.
//!
//! The `redis` feature swaps the process-local map for a Redis-backed store
//! so sessions survive restarts and are shared between instances. Both
//! export the same `SessionStore` name.

#[cfg(not(feature = "redis"))]
mod inmemory;
#[cfg(feature = "redis")]
mod redis_impl;

#[cfg(not(feature = "redis"))]
pub use inmemory::SessionStore;
#[cfg(feature = "redis")]
pub use redis_impl::SessionStore;
