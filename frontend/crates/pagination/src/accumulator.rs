//! Folding successive pages into one newest-first sequence.

use std::cmp::Reverse;

use crate::Page;

/// Items that carry an ordering timestamp.
pub trait Chronological {
    /// Timestamp used for newest-first ordering; larger is newer.
    fn timestamp(&self) -> i64;
}

/// Accumulated items across the pages loaded so far.
///
/// Absorbing page one replaces the sequence; any later page is appended and
/// the combined sequence is re-sorted newest first. Items sharing a timestamp
/// have no guaranteed relative order.
///
/// # Examples
///
/// ```
/// use pagination::{Chronological, Page, PageAccumulator, PageLinks};
///
/// struct Entry(i64);
///
/// impl Chronological for Entry {
///     fn timestamp(&self) -> i64 {
///         self.0
///     }
/// }
///
/// let mut feed = PageAccumulator::new();
/// feed.absorb(Page::new(1, 2, PageLinks::default(), vec![Entry(5), Entry(3)]).expect("page"));
/// feed.absorb(Page::new(2, 2, PageLinks::default(), vec![Entry(4), Entry(1)]).expect("page"));
/// let order: Vec<i64> = feed.items().iter().map(Chronological::timestamp).collect();
/// assert_eq!(order, vec![5, 4, 3, 1]);
/// assert!(!feed.has_more());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAccumulator<T> {
    items: Vec<T>,
    current_page: Option<u32>,
    total_pages: u32,
}

impl<T> Default for PageAccumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PageAccumulator<T> {
    /// Create an empty accumulator with no page loaded.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            current_page: None,
            total_pages: 0,
        }
    }

    /// Accumulated items, newest first.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Page number of the most recently absorbed page.
    #[must_use]
    pub const fn current_page(&self) -> Option<u32> {
        self.current_page
    }

    /// Total page count reported by the most recently absorbed page.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether the listing reports pages beyond the current one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.current_page
            .is_some_and(|current| current < self.total_pages)
    }

    /// Page number a "show more" action should request next.
    #[must_use]
    pub fn next_page(&self) -> u32 {
        self.current_page
            .map_or(1, |current| current.saturating_add(1))
    }

    /// Drop every accumulated item and forget page bookkeeping.
    pub fn reset(&mut self) {
        self.items.clear();
        self.current_page = None;
        self.total_pages = 0;
    }
}

impl<T: Chronological> PageAccumulator<T> {
    /// Fold one page into the accumulated sequence.
    ///
    /// Returns the number of items the page contributed.
    pub fn absorb(&mut self, page: Page<T>) -> usize {
        let page_number = page.page();
        let total_pages = page.total_pages();
        let mut incoming = page.into_items();
        let added = incoming.len();
        sort_newest_first(&mut incoming);

        if page_number == 1 {
            self.items = incoming;
        } else {
            self.items.append(&mut incoming);
            sort_newest_first(&mut self.items);
        }

        self.current_page = Some(page_number);
        self.total_pages = total_pages;
        added
    }
}

fn sort_newest_first<T: Chronological>(items: &mut [T]) {
    items.sort_by_key(|item| Reverse(item.timestamp()));
}
