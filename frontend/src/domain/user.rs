//! Roster data model: listed users and selectable positions.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use pagination::{Chronological, Page};

/// Server-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(u64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registered user as listed by the API.
///
/// Users are immutable once fetched; a refetch replaces them wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone in `+380XXXXXXXXX` form.
    pub phone: String,
    /// Position label.
    pub position: String,
    /// Photo URL.
    pub photo: String,
    /// Registration time as a Unix timestamp; only used for ordering.
    pub registration_timestamp: i64,
}

impl Chronological for User {
    fn timestamp(&self) -> i64 {
        self.registration_timestamp
    }
}

/// One page of listed users.
pub type UsersPage = Page<User>;

/// Identifier of a selectable position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionId(u32);

impl PositionId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PositionId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Read-only reference data offered by the position selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Identifier submitted with a registration.
    pub id: PositionId,
    /// Label shown next to the choice.
    pub name: String,
}
