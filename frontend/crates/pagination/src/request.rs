//! Validated page request parameters.

use std::num::NonZeroU32;

use thiserror::Error;

/// Number of items requested per page when callers do not override it.
pub const DEFAULT_PAGE_SIZE: u32 = 6;

/// Errors raised while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Page numbers start at one.
    #[error("page number must be at least 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("page size must be at least 1")]
    ZeroCount,
}

/// One page-numbered request.
///
/// # Examples
///
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(2, 6).expect("valid request");
/// assert_eq!(request.page(), 2);
/// assert_eq!(request.count(), 6);
/// assert!(PageRequest::new(0, 6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: NonZeroU32,
    count: NonZeroU32,
}

impl PageRequest {
    /// Validate a page number and page size.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroPage`] or
    /// [`PageRequestError::ZeroCount`] when either value is zero.
    pub fn new(page: u32, count: u32) -> Result<Self, PageRequestError> {
        let page = NonZeroU32::new(page).ok_or(PageRequestError::ZeroPage)?;
        let count = NonZeroU32::new(count).ok_or(PageRequestError::ZeroCount)?;
        Ok(Self { page, count })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page.get()
    }

    /// Requested page size.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count.get()
    }
}
