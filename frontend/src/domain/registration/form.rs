//! Registration form controller.
//!
//! The form moves through `Editing -> Submitting -> (Succeeded | Rejected)`.
//! Every edit re-runs the rule for the edited field, but errors are only
//! surfaced once that field is dirty. Submission is allowed when every field
//! is valid, the positions list has loaded, and nothing is in flight.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::fields::{check_email, check_name, check_phone};
use super::{
    EmailAddress, FieldError, PHONE_PREFIX, PersonName, PhoneNumber, RegistrationDraft,
    RegistrationReceipt, TextRule,
};
use crate::domain::events::{RegistrationEvents, RosterEvent};
use crate::domain::lifecycle::Lifecycle;
use crate::domain::photo::{PhotoCandidate, PhotoRejection, PhotoValidator, ValidatedPhoto};
use crate::domain::ports::{ApiError, PositionsApi};
use crate::domain::{Position, PositionId};

/// Banner shown when a submission fails without a server explanation.
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// Form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// Applicant name.
    Name,
    /// Contact email.
    Email,
    /// Contact phone.
    Phone,
    /// Selected position.
    Position,
    /// Uploaded photo.
    Photo,
}

impl FieldKey {
    /// Every field, in display order.
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Position,
        Self::Photo,
    ];
}

/// Rules for the free-text fields, evaluated on every change.
const TEXT_RULES: [(FieldKey, TextRule); 3] = [
    (FieldKey::Name, check_name as TextRule),
    (FieldKey::Email, check_email as TextRule),
    (FieldKey::Phone, check_phone as TextRule),
];

fn text_rule(key: FieldKey) -> Option<TextRule> {
    TEXT_RULES
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, rule)| *rule)
}

/// Value, current error, and dirty flag for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState<T> {
    value: T,
    error: Option<FieldError>,
    dirty: bool,
}

impl<T> FieldState<T> {
    fn pristine(value: T, error: Option<FieldError>) -> Self {
        Self {
            value,
            error,
            dirty: false,
        }
    }

    fn edit(&mut self, value: T, error: Option<FieldError>) {
        self.value = value;
        self.error = error;
        self.dirty = true;
    }

    /// Current value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Current error, whether or not it is shown.
    pub fn error(&self) -> Option<FieldError> {
        self.error
    }

    /// Error to display: only dirty fields surface one.
    pub fn visible_error(&self) -> Option<FieldError> {
        self.error.filter(|_| self.dirty)
    }

    /// Whether the user has touched the field.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether the current value passes its rule.
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// What the photo field currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PhotoSelection {
    /// Nothing picked.
    #[default]
    None,
    /// A file that passed every photo rule.
    Accepted(ValidatedPhoto),
    /// A file that failed a rule; the reason is the field error.
    Rejected(PhotoCandidate),
}

impl PhotoSelection {
    /// File name of the current selection, if any.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Accepted(photo) => Some(photo.candidate().file_name()),
            Self::Rejected(candidate) => Some(candidate.file_name()),
        }
    }
}

/// Loading state of the position selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionsState {
    /// Fetch pending; the selector is disabled.
    Loading,
    /// Positions available for selection.
    Ready(Vec<Position>),
    /// Fetch failed; `load_positions` may be retried.
    Failed(ApiError),
}

impl PositionsState {
    fn offers(&self, id: PositionId) -> bool {
        match self {
            Self::Ready(positions) => positions.iter().any(|position| position.id == id),
            Self::Loading | Self::Failed(_) => true,
        }
    }
}

/// Submission lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    /// Accepting edits.
    Editing,
    /// Token fetch or submission in flight.
    Submitting,
    /// The last submission was accepted and the form was cleared.
    Succeeded,
    /// The last submission failed; fields are kept and a banner is shown.
    Rejected {
        /// Banner text.
        message: String,
    },
}

/// Why [`RegistrationForm::submit`] did not register anyone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// A field is invalid, positions are not loaded, or a submission is in
    /// flight. Every field is marked dirty so its error becomes visible.
    #[error("registration form is not ready to submit")]
    NotReady,
    /// The token fetch or the submission failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Callback run after a successful submission.
pub type SuccessHook = Box<dyn FnMut(&RegistrationReceipt) + Send>;

/// Controller owning the registration form state.
pub struct RegistrationForm {
    api: Arc<dyn PositionsApi>,
    validator: PhotoValidator,
    events: RegistrationEvents,
    lifecycle: Lifecycle,
    on_success: Option<SuccessHook>,
    name: FieldState<String>,
    email: FieldState<String>,
    phone: FieldState<String>,
    position: FieldState<Option<PositionId>>,
    photo: FieldState<PhotoSelection>,
    positions: PositionsState,
    status: FormStatus,
}

impl RegistrationForm {
    /// Build an empty form. Positions start in [`PositionsState::Loading`]
    /// until [`Self::load_positions`] completes.
    pub fn new(
        api: Arc<dyn PositionsApi>,
        validator: PhotoValidator,
        events: RegistrationEvents,
    ) -> Self {
        let mut form = Self {
            api,
            validator,
            events,
            lifecycle: Lifecycle::new(),
            on_success: None,
            name: FieldState::pristine(String::new(), None),
            email: FieldState::pristine(String::new(), None),
            phone: FieldState::pristine(String::new(), None),
            position: FieldState::pristine(None, None),
            photo: FieldState::pristine(PhotoSelection::None, None),
            positions: PositionsState::Loading,
            status: FormStatus::Editing,
        };
        form.reset_fields();
        form
    }

    /// Install a callback run after every successful submission.
    #[must_use]
    pub fn with_on_success(mut self, hook: SuccessHook) -> Self {
        self.on_success = Some(hook);
        self
    }

    /// Handle to this form's liveness guard.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.clone()
    }

    /// Invalidate the form; later async results are discarded.
    pub fn tear_down(&self) {
        self.lifecycle.tear_down();
    }

    /// Fetch the selectable positions.
    ///
    /// # Errors
    ///
    /// Returns the API failure, which is also kept as
    /// [`PositionsState::Failed`] so the caller may retry.
    pub async fn load_positions(&mut self) -> Result<(), ApiError> {
        self.positions = PositionsState::Loading;
        let result = self.api.fetch_positions().await;
        if !self.lifecycle.is_live() {
            debug!("discarding positions fetched after teardown");
            return Ok(());
        }
        match result {
            Ok(positions) => {
                debug!(count = positions.len(), "positions loaded");
                self.positions = PositionsState::Ready(positions);
                let error = self.position_rule(*self.position.value());
                self.position.error = error;
                Ok(())
            }
            Err(error) => {
                warn!(kind = error.kind(), error = %error, "positions failed to load");
                self.positions = PositionsState::Failed(error.clone());
                Err(error)
            }
        }
    }

    /// Replace the name.
    pub fn set_name(&mut self, value: impl Into<String>) {
        self.edit_text(FieldKey::Name, value.into());
    }

    /// Replace the email.
    pub fn set_email(&mut self, value: impl Into<String>) {
        self.edit_text(FieldKey::Email, value.into());
    }

    /// Replace the phone as typed. Call [`Self::blur_phone`] to normalise it.
    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.edit_text(FieldKey::Phone, value.into());
    }

    /// Re-derive the phone value in `+380XXXXXXXXX` form.
    pub fn blur_phone(&mut self) {
        let normalised = PhoneNumber::normalize(self.phone.value());
        self.edit_text(FieldKey::Phone, normalised);
    }

    /// Choose a position, or clear the choice.
    pub fn select_position(&mut self, id: Option<PositionId>) {
        let error = self.position_rule(id);
        self.position.edit(id, error);
        self.resume_editing();
    }

    /// Pick a photo, or clear the selection, and validate it.
    pub async fn set_photo(&mut self, candidate: Option<PhotoCandidate>) {
        let (selection, error) = match candidate {
            None => (PhotoSelection::None, Some(FieldError::from(PhotoRejection::Missing))),
            Some(candidate) => match self.validator.accept(candidate).await {
                Ok(photo) => (PhotoSelection::Accepted(photo), None),
                Err(rejected) => (
                    PhotoSelection::Rejected(rejected.candidate),
                    Some(FieldError::from(rejected.reason)),
                ),
            },
        };
        if !self.lifecycle.is_live() {
            debug!("discarding photo validated after teardown");
            return;
        }
        self.photo.edit(selection, error);
        self.resume_editing();
    }

    /// Name field state.
    pub fn name(&self) -> &FieldState<String> {
        &self.name
    }

    /// Email field state.
    pub fn email(&self) -> &FieldState<String> {
        &self.email
    }

    /// Phone field state.
    pub fn phone(&self) -> &FieldState<String> {
        &self.phone
    }

    /// Position field state.
    pub fn position(&self) -> &FieldState<Option<PositionId>> {
        &self.position
    }

    /// Photo field state.
    pub fn photo(&self) -> &FieldState<PhotoSelection> {
        &self.photo
    }

    /// Position selector state.
    pub fn positions(&self) -> &PositionsState {
        &self.positions
    }

    /// Submission status.
    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Banner text after a failed submission.
    pub fn banner(&self) -> Option<&str> {
        match &self.status {
            FormStatus::Rejected { message } => Some(message),
            _ => None,
        }
    }

    /// Error to display next to `key`, if that field is dirty.
    pub fn field_error(&self, key: FieldKey) -> Option<FieldError> {
        match key {
            FieldKey::Name => self.name.visible_error(),
            FieldKey::Email => self.email.visible_error(),
            FieldKey::Phone => self.phone.visible_error(),
            FieldKey::Position => self.position.visible_error(),
            FieldKey::Photo => self.photo.visible_error(),
        }
    }

    /// Whether every field currently passes its rule.
    pub fn is_valid(&self) -> bool {
        self.name.is_valid()
            && self.email.is_valid()
            && self.phone.is_valid()
            && self.position.is_valid()
            && self.photo.is_valid()
    }

    /// Whether the selector can be used.
    pub fn positions_ready(&self) -> bool {
        matches!(self.positions, PositionsState::Ready(_))
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.is_valid() && self.positions_ready() && self.status != FormStatus::Submitting
    }

    /// Assemble the validated payload, if every field is valid.
    pub fn draft(&self) -> Option<RegistrationDraft> {
        let PhotoSelection::Accepted(photo) = self.photo.value() else {
            return None;
        };
        let position_id = (*self.position.value())?;
        if self.position.error.is_some() {
            return None;
        }
        Some(RegistrationDraft {
            name: PersonName::new(self.name.value().as_str()).ok()?,
            email: EmailAddress::new(self.email.value()).ok()?,
            phone: PhoneNumber::new(self.phone.value().as_str()).ok()?,
            position_id,
            photo: photo.clone(),
        })
    }

    /// Submit the form.
    ///
    /// Fetches a fresh upload token, then posts the draft with it. On success
    /// the fields return to their defaults, the success hook runs, and a
    /// [`RosterEvent::UserRegistered`] notification is published.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::NotReady`] without any request when submission
    /// is blocked, or [`SubmitError::Api`] when either request fails. A
    /// failure leaves the fields intact and shows a banner.
    pub async fn submit(&mut self) -> Result<RegistrationReceipt, SubmitError> {
        let draft = match self.draft() {
            Some(draft) if self.can_submit() => draft,
            _ => {
                self.touch_all();
                return Err(SubmitError::NotReady);
            }
        };

        let result = {
            let _submitting = Submitting::begin(&mut self.status);
            send(self.api.as_ref(), &draft).await
        };
        match result {
            Ok(receipt) => {
                if self.lifecycle.is_live() {
                    self.reset_fields();
                    self.status = FormStatus::Succeeded;
                    if let Some(hook) = self.on_success.as_mut() {
                        hook(&receipt);
                    }
                }
                let subscribers = self.events.publish(RosterEvent::UserRegistered);
                info!(
                    user_id = ?receipt.user_id.map(|id| id.get()),
                    subscribers,
                    "registration accepted"
                );
                Ok(receipt)
            }
            Err(error) => {
                warn!(kind = error.kind(), error = %error, "registration failed");
                if self.lifecycle.is_live() {
                    self.status = FormStatus::Rejected {
                        message: banner_message(&error),
                    };
                }
                Err(SubmitError::Api(error))
            }
        }
    }

    /// Hide the failure banner.
    pub fn dismiss_error(&mut self) {
        if matches!(self.status, FormStatus::Rejected { .. }) {
            self.status = FormStatus::Editing;
        }
    }

    fn edit_text(&mut self, key: FieldKey, value: String) {
        let error = text_rule(key).and_then(|rule| rule(&value).err());
        let field = match key {
            FieldKey::Name => &mut self.name,
            FieldKey::Email => &mut self.email,
            FieldKey::Phone => &mut self.phone,
            FieldKey::Position | FieldKey::Photo => return,
        };
        field.edit(value, error);
        self.resume_editing();
    }

    fn position_rule(&self, id: Option<PositionId>) -> Option<FieldError> {
        match id {
            None => Some(FieldError::PositionRequired),
            Some(id) if !self.positions.offers(id) => Some(FieldError::PositionUnknown),
            Some(_) => None,
        }
    }

    fn reset_fields(&mut self) {
        let rule_error = |key: FieldKey, value: &str| {
            text_rule(key).and_then(|rule| rule(value).err())
        };
        self.name = FieldState::pristine(String::new(), rule_error(FieldKey::Name, ""));
        self.email = FieldState::pristine(String::new(), rule_error(FieldKey::Email, ""));
        self.phone = FieldState::pristine(
            PHONE_PREFIX.to_owned(),
            rule_error(FieldKey::Phone, PHONE_PREFIX),
        );
        self.position = FieldState::pristine(None, Some(FieldError::PositionRequired));
        self.photo = FieldState::pristine(
            PhotoSelection::None,
            Some(FieldError::from(PhotoRejection::Missing)),
        );
    }

    fn touch_all(&mut self) {
        self.name.dirty = true;
        self.email.dirty = true;
        self.phone.dirty = true;
        self.position.dirty = true;
        self.photo.dirty = true;
    }

    fn resume_editing(&mut self) {
        if self.status == FormStatus::Succeeded {
            self.status = FormStatus::Editing;
        }
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("position", &self.position)
            .field("photo", &self.photo)
            .field("positions", &self.positions)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Holds the form in [`FormStatus::Submitting`] while a submission runs.
///
/// Dropped before an outcome is recorded, the form returns to editing so a
/// cancelled submission does not leave the submit control disabled.
struct Submitting<'a>(&'a mut FormStatus);

impl<'a> Submitting<'a> {
    fn begin(status: &'a mut FormStatus) -> Self {
        *status = FormStatus::Submitting;
        Self(status)
    }
}

impl Drop for Submitting<'_> {
    fn drop(&mut self) {
        if *self.0 == FormStatus::Submitting {
            *self.0 = FormStatus::Editing;
        }
    }
}

async fn send(
    api: &dyn PositionsApi,
    draft: &RegistrationDraft,
) -> Result<RegistrationReceipt, ApiError> {
    let token = api.fetch_upload_token().await?;
    debug!(position_id = draft.position_id.get(), "submitting registration");
    api.submit_registration(draft, &token).await
}

fn banner_message(error: &ApiError) -> String {
    if error.is_validation() {
        error.message().to_owned()
    } else {
        REGISTRATION_FAILED.to_owned()
    }
}
