//! Driven port for fetching pages of registered users.

use async_trait::async_trait;
use pagination::{Page, PageLinks, PageRequest};

use super::ApiError;
use crate::domain::{User, UsersPage};

/// Port for listing users one page at a time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Fetch one page of users.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use frontend::domain::ports::{FixtureUsersApi, UsersApi};
    /// use pagination::PageRequest;
    ///
    /// let api = FixtureUsersApi::default();
    /// let page = api.fetch_users(PageRequest::new(1, 6)?).await?;
    /// assert!(page.items().is_empty());
    /// ```
    async fn fetch_users(&self, request: PageRequest) -> Result<UsersPage, ApiError>;
}

/// Fixture serving a fixed roster, sliced into pages in roster order.
#[derive(Debug, Clone, Default)]
pub struct FixtureUsersApi {
    roster: Vec<User>,
}

impl FixtureUsersApi {
    /// Serve `roster` as the complete listing.
    #[must_use]
    pub fn new(roster: Vec<User>) -> Self {
        Self { roster }
    }
}

#[async_trait]
impl UsersApi for FixtureUsersApi {
    async fn fetch_users(&self, request: PageRequest) -> Result<UsersPage, ApiError> {
        let count = request.count() as usize;
        let total_pages = u32::try_from(self.roster.len().div_ceil(count))
            .map_err(|_| ApiError::network("fixture roster too large"))?;
        if request.page() > total_pages && !self.roster.is_empty() {
            return Err(ApiError::network("status 404: Page not found"));
        }

        let start = (request.page() as usize - 1) * count;
        let users = self
            .roster
            .iter()
            .skip(start)
            .take(count)
            .cloned()
            .collect();
        Page::new(request.page(), total_pages, PageLinks::default(), users)
            .map_err(|error| ApiError::network(error.to_string()))
    }
}
