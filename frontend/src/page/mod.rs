//! Page composition: mounts both controllers and wires the registration
//! channel between them.
//!
//! The form publishes on a channel owned by the page; the user list holds
//! the only subscription. [`HomePage::sync`] applies pending notifications,
//! and [`HomePage::register`] calls it after every accepted submission.

mod render;

use std::num::NonZeroU32;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::{ApiError, ImageProbe, PositionsApi, UsersApi};
use crate::domain::{
    LoadOutcome, PhotoValidator, RegistrationEvents, RegistrationForm, RegistrationReceipt,
    SubmitError, UserListController, UserListError,
};

pub use render::HomePageView;

/// Results of the two mount-time fetches.
#[derive(Debug)]
pub struct MountReport {
    /// First page of users.
    pub users: Result<LoadOutcome, UserListError>,
    /// Positions for the selector.
    pub positions: Result<(), ApiError>,
}

impl MountReport {
    /// Whether both fetches succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.users.is_ok() && self.positions.is_ok()
    }
}

/// The landing page: a user list above a registration form.
#[derive(Debug)]
pub struct HomePage {
    users: UserListController,
    form: RegistrationForm,
    events: RegistrationEvents,
}

impl HomePage {
    /// Compose the page from its ports.
    pub fn new(
        users_api: Arc<dyn UsersApi>,
        positions_api: Arc<dyn PositionsApi>,
        probe: Arc<dyn ImageProbe>,
        page_size: NonZeroU32,
    ) -> Self {
        let events = RegistrationEvents::new();
        let users =
            UserListController::new(users_api, page_size).with_registrations(events.subscribe());
        let form = RegistrationForm::new(positions_api, PhotoValidator::new(probe), events.clone());
        Self {
            users,
            form,
            events,
        }
    }

    /// Load the first users page and the positions concurrently.
    pub async fn mount(&mut self) -> MountReport {
        let (users, positions) = tokio::join!(self.users.mount(), self.form.load_positions());
        info!(
            users_loaded = users.is_ok(),
            positions_loaded = positions.is_ok(),
            "home page mounted"
        );
        MountReport { users, positions }
    }

    /// Request the next users page.
    ///
    /// # Errors
    ///
    /// Propagates the list controller's failure.
    pub async fn show_more(&mut self) -> Result<LoadOutcome, UserListError> {
        self.users.load_more().await
    }

    /// Submit the form and, on success, reload the list from page one.
    ///
    /// # Errors
    ///
    /// Propagates the form's failure. A failed list reload is recorded on the
    /// list and does not fail the registration.
    pub async fn register(&mut self) -> Result<RegistrationReceipt, SubmitError> {
        let receipt = self.form.submit().await?;
        if let Err(error) = self.sync().await {
            warn!(error = %error, "user list reload after registration failed");
        }
        Ok(receipt)
    }

    /// Apply pending registration notifications to the list.
    ///
    /// # Errors
    ///
    /// Propagates the list controller's failure.
    pub async fn sync(&mut self) -> Result<LoadOutcome, UserListError> {
        self.users.sync_registrations().await
    }

    /// Tear both controllers down; in-flight results are discarded.
    pub fn tear_down(&self) {
        self.users.tear_down();
        self.form.tear_down();
    }

    /// The user list.
    pub fn users(&self) -> &UserListController {
        &self.users
    }

    /// The user list, for retries.
    pub fn users_mut(&mut self) -> &mut UserListController {
        &mut self.users
    }

    /// The registration form.
    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    /// The registration form, for edits.
    pub fn form_mut(&mut self) -> &mut RegistrationForm {
        &mut self.form
    }

    /// Channel the form publishes registrations on.
    pub fn events(&self) -> &RegistrationEvents {
        &self.events
    }

    /// Plain-text view of the page.
    pub fn view(&self) -> HomePageView<'_> {
        HomePageView::new(self)
    }

    /// Render the page as plain text.
    pub fn render(&self) -> String {
        self.view().to_string()
    }
}
