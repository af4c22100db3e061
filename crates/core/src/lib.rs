//! Functional core of the image bookmarks service.
//!
//! Domain types, validation, pagination and the traits implemented by the
//! storage, stats and session backends. Nothing in here performs I/O.

pub mod auth;
pub mod images;
pub mod pagination;
pub mod serde;
pub mod stats;
pub mod storage;
