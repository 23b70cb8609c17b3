//! Pagination primitives shared by the roster client.
//!
//! The crate owns three concerns:
//!
//! - [`PageRequest`]: a validated `(page, count)` pair where both values are
//!   at least one.
//! - [`Page`]: the envelope returned by page-numbered listing endpoints,
//!   including navigation links. Construction enforces
//!   `page <= total_pages` and, when checked against a request, that the
//!   envelope holds no more items than were asked for.
//! - [`PageAccumulator`]: the "show more" buffer that folds successive pages
//!   into one sequence ordered newest first by [`Chronological::timestamp`].
//!
//! Ordering among items that share a timestamp is unspecified.

mod accumulator;
mod envelope;
mod request;

pub use accumulator::{Chronological, PageAccumulator};
pub use envelope::{Page, PageError, PageLinks};
pub use request::{DEFAULT_PAGE_SIZE, PageRequest, PageRequestError};
