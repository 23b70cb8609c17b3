//! Registration form: field rules, the submission payload, and the
//! controller that drives both.

mod draft;
mod fields;
mod form;

pub use draft::{RegistrationDraft, RegistrationReceipt, UploadToken};
pub use fields::{
    EmailAddress, FieldError, NAME_MAX, NAME_MIN, PHONE_DIGITS, PHONE_PREFIX, PersonName,
    PhoneNumber, TextRule,
};
pub use form::{
    FieldKey, FieldState, FormStatus, PhotoSelection, PositionsState, REGISTRATION_FAILED,
    RegistrationForm, SubmitError, SuccessHook,
};
