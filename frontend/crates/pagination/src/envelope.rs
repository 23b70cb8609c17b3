//! Page envelope returned by page-numbered listing endpoints.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::PageRequest;

/// Errors raised when an envelope violates its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// Page numbers start at one.
    #[error("page number must be at least 1")]
    ZeroPage,
    /// The page number exceeds the reported page count.
    #[error("page {page} exceeds total page count {total_pages}")]
    OutOfRange {
        /// Reported page number.
        page: u32,
        /// Reported total page count.
        total_pages: u32,
    },
    /// The envelope carries more items than the request allowed.
    #[error("page holds {len} items but only {count} were requested")]
    Oversized {
        /// Number of items in the envelope.
        len: usize,
        /// Requested page size.
        count: u32,
    },
}

/// Navigation links attached to a page.
///
/// Both links are absent at the edges of the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    /// Absolute URL of the following page, if any.
    #[serde(default, rename = "next_url")]
    pub next: Option<Url>,
    /// Absolute URL of the preceding page, if any.
    #[serde(default, rename = "prev_url")]
    pub prev: Option<Url>,
}

/// One page of items plus its position within the listing.
///
/// ## Invariants
/// - `page >= 1`.
/// - `page <= total_pages`, except for an empty listing which reports zero
///   pages and carries no items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    page: u32,
    total_pages: u32,
    links: PageLinks,
    items: Vec<T>,
}

impl<T> Page<T> {
    /// Build an envelope, enforcing the page-number invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::ZeroPage`] for page zero and
    /// [`PageError::OutOfRange`] when `page` exceeds `total_pages`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::{Page, PageLinks};
    ///
    /// let page = Page::new(1, 3, PageLinks::default(), vec!["a", "b"]).expect("valid page");
    /// assert!(page.has_more());
    /// assert!(Page::new(4, 3, PageLinks::default(), vec!["a"]).is_err());
    /// ```
    pub fn new(
        page: u32,
        total_pages: u32,
        links: PageLinks,
        items: Vec<T>,
    ) -> Result<Self, PageError> {
        if page == 0 {
            return Err(PageError::ZeroPage);
        }
        let empty_listing = total_pages == 0 && items.is_empty();
        if page > total_pages && !empty_listing {
            return Err(PageError::OutOfRange { page, total_pages });
        }
        Ok(Self {
            page,
            total_pages,
            links,
            items,
        })
    }

    /// Check that the envelope honours the page size of `request`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Oversized`] when the envelope holds more items
    /// than the request asked for.
    pub fn ensure_fits(self, request: &PageRequest) -> Result<Self, PageError> {
        let count = request.count();
        let fits = u32::try_from(self.items.len()).is_ok_and(|len| len <= count);
        if fits {
            Ok(self)
        } else {
            Err(PageError::Oversized {
                len: self.items.len(),
                count,
            })
        }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Total number of pages reported for the listing.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Navigation links.
    #[must_use]
    pub const fn links(&self) -> &PageLinks {
        &self.links
    }

    /// Items carried by this page, in server order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Whether further pages follow this one.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    /// Consume the envelope, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn rejects_page_zero() {
        let result = Page::new(0, 1, PageLinks::default(), vec![1]);
        assert_eq!(result, Err(PageError::ZeroPage));
    }

    #[rstest]
    fn rejects_page_beyond_total() {
        let result = Page::new(3, 2, PageLinks::default(), vec![1]);
        assert_eq!(
            result,
            Err(PageError::OutOfRange {
                page: 3,
                total_pages: 2
            })
        );
    }

    #[rstest]
    fn accepts_empty_listing() {
        let page = Page::<u8>::new(1, 0, PageLinks::default(), Vec::new()).expect("empty listing");
        assert!(!page.has_more());
        assert!(page.items().is_empty());
    }

    #[rstest]
    #[case::exact(3, true)]
    #[case::smaller(2, true)]
    #[case::larger(4, false)]
    fn ensure_fits_checks_requested_count(#[case] len: usize, #[case] fits: bool) {
        let request = PageRequest::new(1, 3).expect("valid request");
        let page = Page::new(1, 1, PageLinks::default(), vec![0_u8; len]).expect("valid page");
        assert_eq!(page.ensure_fits(&request).is_ok(), fits);
    }

    #[rstest]
    fn decodes_links_with_nulls() {
        let links: PageLinks = serde_json::from_str(
            r#"{"next_url":"https://api.example.test/users?page=2&count=6","prev_url":null}"#,
        )
        .expect("links decode");
        assert_eq!(
            links.next.as_ref().map(Url::as_str),
            Some("https://api.example.test/users?page=2&count=6")
        );
        assert!(links.prev.is_none());
    }
}
