//! Page-number resolution for list views.
//!
//! Pure functions only; the handlers fetch the slice described by a [`Page`].

mod error;
mod paginator;

pub use error::PageError;
pub use paginator::{resolve_page, Page, PageOutcome, Paginator, DEFAULT_PER_PAGE};
