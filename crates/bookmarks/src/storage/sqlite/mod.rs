//! SQLite storage backend.
//!
//! Uses `rusqlite` for the queries and `tokio-rusqlite` to run them on a
//! dedicated thread without blocking the runtime.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
