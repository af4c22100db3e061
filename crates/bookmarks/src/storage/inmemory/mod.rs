//! In-memory storage backend.
//!
//! Stores everything in HashMaps wrapped in `Arc<RwLock<_>>`. Useful for
//! development and tests where persistence is not required.

mod repository;

pub use repository::InMemoryRepository;
