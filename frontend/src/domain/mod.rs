//! Domain types, validation rules, ports, and the controllers built on them.
//!
//! Purpose: keep every rule about users, positions, photos, and registration
//! independent of HTTP and rendering. Controllers reach the outside world
//! only through the traits in [`ports`].
//!
//! Public surface:
//! - User, Position (alias to `user::*`): listed roster data.
//! - PhotoValidator (alias to `photo::PhotoValidator`): upload rules.
//! - RegistrationForm (alias to `registration::RegistrationForm`): sign-up
//!   controller.
//! - UserListController (alias to `user_list::UserListController`): paged
//!   roster controller.
//! - RegistrationEvents (alias to `events::RegistrationEvents`): channel
//!   connecting the two controllers.

pub mod events;
pub mod lifecycle;
pub mod photo;
pub mod ports;
pub mod registration;
pub mod user;
pub mod user_list;

pub use self::events::{RegistrationEvents, RegistrationSubscription, RosterEvent};
pub use self::lifecycle::Lifecycle;
pub use self::photo::{PhotoCandidate, PhotoRejection, PhotoValidator, ValidatedPhoto};
pub use self::registration::{
    FieldError, FieldKey, FormStatus, PositionsState, RegistrationDraft, RegistrationForm,
    RegistrationReceipt, SubmitError, UploadToken,
};
pub use self::user::{Position, PositionId, User, UserId, UsersPage};
pub use self::user_list::{LoadOutcome, ShowMore, UserListController, UserListError};
