//! Submission payloads exchanged with the positions API.

use std::fmt;

use crate::domain::photo::ValidatedPhoto;
use crate::domain::{PositionId, UserId};

use super::{EmailAddress, PersonName, PhoneNumber};

/// A registration ready to submit.
///
/// Every field is an already-validated value, so an invalid draft cannot be
/// constructed. Drafts live only inside the form and are discarded once a
/// submission succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub name: PersonName,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub position_id: PositionId,
    pub photo: ValidatedPhoto,
}

/// Opaque credential authorising one registration submission.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadToken(String);

impl UploadToken {
    /// Wrap a token issued by the API.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token for the `Token` request header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UploadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UploadToken(<redacted>)")
    }
}

/// What the API reports after accepting a registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationReceipt {
    /// Identifier of the created user, when reported.
    pub user_id: Option<UserId>,
    /// Confirmation message, when reported.
    pub message: Option<String>,
}
