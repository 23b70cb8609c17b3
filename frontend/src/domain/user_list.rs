//! User list controller: incremental pagination over the users API.
//!
//! Pages are folded into a [`PageAccumulator`] so the visible list is always
//! sorted newest first. A registration notification resets the list and
//! reloads it from page one.

use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;

use pagination::{PageAccumulator, PageRequest, PageRequestError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::User;
use crate::domain::events::RegistrationSubscription;
use crate::domain::lifecycle::{InFlight, Lifecycle};
use crate::domain::ports::{ApiError, UsersApi};

/// State of the "show more" control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowMore {
    /// No further pages; the control is absent.
    Hidden,
    /// Another page can be requested.
    Enabled,
    /// Shown but disabled while a fetch is in flight.
    Busy,
}

/// What a load call did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page was merged into the list.
    Applied {
        /// Page that was loaded.
        page: u32,
        /// Users it contributed.
        added: usize,
    },
    /// The controller was torn down before the response arrived.
    Discarded,
    /// There was nothing to fetch.
    NothingToLoad,
}

/// The most recent failed load, kept so it can be retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    /// Page that failed to load.
    pub page: u32,
    /// Why it failed.
    pub error: ApiError,
}

/// Errors surfaced by [`UserListController`] loads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserListError {
    /// The requested page number was out of bounds.
    #[error(transparent)]
    Request(#[from] PageRequestError),
    /// The users API failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Controller owning the accumulated user list.
pub struct UserListController {
    api: Arc<dyn UsersApi>,
    page_size: NonZeroU32,
    feed: PageAccumulator<User>,
    loading: bool,
    last_failure: Option<LoadFailure>,
    registrations: Option<RegistrationSubscription>,
    lifecycle: Lifecycle,
}

impl UserListController {
    /// Build an empty list fetching `page_size` users per page.
    pub fn new(api: Arc<dyn UsersApi>, page_size: NonZeroU32) -> Self {
        Self {
            api,
            page_size,
            feed: PageAccumulator::new(),
            loading: false,
            last_failure: None,
            registrations: None,
            lifecycle: Lifecycle::new(),
        }
    }

    /// Reload from page one whenever `subscription` reports a registration.
    #[must_use]
    pub fn with_registrations(mut self, subscription: RegistrationSubscription) -> Self {
        self.registrations = Some(subscription);
        self
    }

    /// Handle to this controller's liveness guard.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.clone()
    }

    /// Load the first page.
    ///
    /// # Errors
    ///
    /// See [`Self::load_page`].
    pub async fn mount(&mut self) -> Result<LoadOutcome, UserListError> {
        self.load_page(1).await
    }

    /// Fetch page `page` and merge it into the list.
    ///
    /// Page one replaces the list; later pages are appended and the whole
    /// list is re-sorted newest first. A failure leaves the list untouched
    /// and is kept for [`Self::retry`].
    ///
    /// # Errors
    ///
    /// Returns [`UserListError::Request`] for page zero and
    /// [`UserListError::Api`] when the fetch fails.
    pub async fn load_page(&mut self, page: u32) -> Result<LoadOutcome, UserListError> {
        let request = PageRequest::new(page, self.page_size.get())?;
        debug!(page, count = request.count(), "loading users");

        let result = {
            let _in_flight = InFlight::raise(&mut self.loading);
            self.api.fetch_users(request).await
        };

        if !self.lifecycle.is_live() {
            debug!(page, "discarding users fetched after teardown");
            return Ok(LoadOutcome::Discarded);
        }

        match result {
            Ok(users) => {
                let added = self.feed.absorb(users);
                self.last_failure = None;
                debug!(
                    page,
                    added,
                    total_pages = self.feed.total_pages(),
                    "users page applied"
                );
                Ok(LoadOutcome::Applied { page, added })
            }
            Err(error) => {
                warn!(page, kind = error.kind(), error = %error, "users page failed to load");
                self.last_failure = Some(LoadFailure {
                    page,
                    error: error.clone(),
                });
                Err(UserListError::Api(error))
            }
        }
    }

    /// Load the page after the current one, if the listing has more.
    ///
    /// # Errors
    ///
    /// See [`Self::load_page`].
    pub async fn load_more(&mut self) -> Result<LoadOutcome, UserListError> {
        if self.show_more() != ShowMore::Enabled {
            return Ok(LoadOutcome::NothingToLoad);
        }
        self.load_page(self.feed.next_page()).await
    }

    /// Reload the page whose last load failed.
    ///
    /// # Errors
    ///
    /// See [`Self::load_page`].
    pub async fn retry(&mut self) -> Result<LoadOutcome, UserListError> {
        match self.last_failure.as_ref() {
            Some(failure) => {
                let page = failure.page;
                self.load_page(page).await
            }
            None => Ok(LoadOutcome::NothingToLoad),
        }
    }

    /// Discard every accumulated user and load page one again.
    ///
    /// # Errors
    ///
    /// See [`Self::load_page`].
    pub async fn reload(&mut self) -> Result<LoadOutcome, UserListError> {
        info!(discarded = self.feed.items().len(), "user list reset");
        self.feed.reset();
        self.last_failure = None;
        self.load_page(1).await
    }

    /// Apply pending registration notifications.
    ///
    /// # Errors
    ///
    /// See [`Self::load_page`].
    pub async fn sync_registrations(&mut self) -> Result<LoadOutcome, UserListError> {
        let registered = self
            .registrations
            .as_mut()
            .is_some_and(RegistrationSubscription::take_pending);
        if registered {
            self.reload().await
        } else {
            Ok(LoadOutcome::NothingToLoad)
        }
    }

    /// Invalidate the controller; later responses are discarded.
    pub fn tear_down(&self) {
        self.lifecycle.tear_down();
    }

    /// Users loaded so far, newest first.
    pub fn users(&self) -> &[User] {
        self.feed.items()
    }

    /// Most recently loaded page.
    pub fn current_page(&self) -> Option<u32> {
        self.feed.current_page()
    }

    /// Total pages reported by the last response.
    pub fn total_pages(&self) -> u32 {
        self.feed.total_pages()
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The failure [`Self::retry`] would recover from.
    pub fn last_failure(&self) -> Option<&LoadFailure> {
        self.last_failure.as_ref()
    }

    /// State of the "show more" control.
    pub fn show_more(&self) -> ShowMore {
        match (self.feed.has_more(), self.loading) {
            (false, _) => ShowMore::Hidden,
            (true, true) => ShowMore::Busy,
            (true, false) => ShowMore::Enabled,
        }
    }
}

impl fmt::Debug for UserListController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserListController")
            .field("page_size", &self.page_size)
            .field("users", &self.feed.items().len())
            .field("current_page", &self.feed.current_page())
            .field("total_pages", &self.feed.total_pages())
            .field("loading", &self.loading)
            .field("last_failure", &self.last_failure)
            .finish_non_exhaustive()
    }
}
