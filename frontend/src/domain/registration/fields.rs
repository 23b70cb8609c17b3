//! Registration field values and their validation rules.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::domain::photo::PhotoRejection;

/// Minimum name length, in characters.
pub const NAME_MIN: usize = 2;
/// Maximum name length, in characters.
pub const NAME_MAX: usize = 60;
/// Country-code prefix every phone number carries.
pub const PHONE_PREFIX: &str = "+380";
/// Subscriber digits following [`PHONE_PREFIX`].
pub const PHONE_DIGITS: usize = 9;

const COUNTRY_CODE: &str = "380";
const TRUNK_PREFIX: char = '0';

/// Field-level validation failures. `Display` is the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The name is empty or only whitespace.
    #[error("Name is required")]
    NameRequired,
    /// The name has fewer than `min` characters.
    #[error("Name must be at least {min} characters")]
    NameTooShort {
        /// Shortest accepted name.
        min: usize,
    },
    /// The name has more than `max` characters.
    #[error("Name must be at most {max} characters")]
    NameTooLong {
        /// Longest accepted name.
        max: usize,
    },
    /// The email is empty.
    #[error("Email is required")]
    EmailRequired,
    /// The email does not look like `local@domain.tld`.
    #[error("Email is invalid")]
    EmailInvalid,
    /// The phone is empty.
    #[error("Phone is required")]
    PhoneRequired,
    /// The phone is not `+380` followed by nine digits.
    #[error("Phone must match +380XXXXXXXXX")]
    PhoneInvalid,
    /// No position is selected.
    #[error("Position is required")]
    PositionRequired,
    /// The selected position is not in the loaded list.
    #[error("Position is not offered")]
    PositionUnknown,
    /// The photo failed one of its rules.
    #[error(transparent)]
    Photo(#[from] PhotoRejection),
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^\+380\d{9}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// Applicant name between [`NAME_MIN`] and [`NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Validate and construct a [`PersonName`].
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::NameRequired`] for blank input, otherwise a
    /// length error when outside the allowed range.
    pub fn new(name: impl Into<String>) -> Result<Self, FieldError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FieldError::NameRequired);
        }
        let length = name.chars().count();
        if length < NAME_MIN {
            return Err(FieldError::NameTooShort { min: NAME_MIN });
        }
        if length > NAME_MAX {
            return Err(FieldError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self(name))
    }
}

/// Email address with a basic `local@domain.tld` shape. Stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trim, validate, and construct an [`EmailAddress`].
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::EmailRequired`] for blank input and
    /// [`FieldError::EmailInvalid`] when the shape does not match.
    pub fn new(email: impl AsRef<str>) -> Result<Self, FieldError> {
        let email = email.as_ref().trim();
        if email.is_empty() {
            return Err(FieldError::EmailRequired);
        }
        if !email_regex().is_match(email) {
            return Err(FieldError::EmailInvalid);
        }
        Ok(Self(email.to_owned()))
    }
}

/// Phone number in canonical `+380XXXXXXXXX` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate an already-normalised phone number.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::PhoneRequired`] for blank input and
    /// [`FieldError::PhoneInvalid`] when not in canonical form.
    pub fn new(phone: impl Into<String>) -> Result<Self, FieldError> {
        let phone = phone.into();
        if phone.trim().is_empty() {
            return Err(FieldError::PhoneRequired);
        }
        if !phone_regex().is_match(&phone) {
            return Err(FieldError::PhoneInvalid);
        }
        Ok(Self(phone))
    }

    /// Re-derive a phone number from free-form input.
    ///
    /// Non-digits are stripped; a repeated `380` country code is dropped, or
    /// failing that a national trunk `0` when more than nine digits remain;
    /// the rest is truncated to nine digits and prefixed with `+380`.
    ///
    /// # Examples
    ///
    /// ```
    /// use frontend::domain::registration::PhoneNumber;
    ///
    /// assert_eq!(PhoneNumber::normalize("(067) 123-45-67"), "+380671234567");
    /// assert_eq!(PhoneNumber::normalize("+38 067 123 45 67"), "+380671234567");
    /// assert_eq!(PhoneNumber::normalize("12"), "+38012");
    /// ```
    #[must_use]
    pub fn normalize(raw: &str) -> String {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        let subscriber = match digits.strip_prefix(COUNTRY_CODE) {
            Some(rest) => rest,
            None if digits.len() > PHONE_DIGITS => {
                digits.strip_prefix(TRUNK_PREFIX).unwrap_or(digits.as_str())
            }
            None => digits.as_str(),
        };
        let tail: String = subscriber.chars().take(PHONE_DIGITS).collect();
        format!("{PHONE_PREFIX}{tail}")
    }
}

macro_rules! text_newtype_impls {
    ($($name:ident),*) => {
        $(
            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    self.0.as_str()
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<$name> for String {
                fn from(value: $name) -> Self {
                    value.0
                }
            }
        )*
    };
}

text_newtype_impls!(PersonName, EmailAddress, PhoneNumber);

/// Rule signature for free-text fields.
pub type TextRule = fn(&str) -> Result<(), FieldError>;

pub(crate) fn check_name(value: &str) -> Result<(), FieldError> {
    PersonName::new(value).map(drop)
}

pub(crate) fn check_email(value: &str) -> Result<(), FieldError> {
    EmailAddress::new(value).map(drop)
}

pub(crate) fn check_phone(value: &str) -> Result<(), FieldError> {
    PhoneNumber::new(value).map(drop)
}

#[cfg(test)]
mod tests;
