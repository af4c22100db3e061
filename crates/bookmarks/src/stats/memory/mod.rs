//! In-memory stats backend for single-instance deployments.

mod stats;

pub use stats::MemoryStats;
