//! DTOs for the REST endpoints.
//!
//! Responses decode into these transport shapes first and are then mapped
//! into domain types in one pass, so malformed payloads surface as
//! [`ApiError`] rather than leaking serde errors.

use pagination::{Page, PageLinks, PageRequest};
use serde::Deserialize;

use crate::domain::ports::ApiError;
use crate::domain::{Position, PositionId, RegistrationReceipt, User, UserId, UsersPage};

/// Identifiers the API sends either as numbers or as numeric strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum IdDto {
    Number(u64),
    Text(String),
}

impl IdDto {
    fn into_u64(self) -> Result<u64, String> {
        match self {
            Self::Number(id) => Ok(id),
            Self::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| format!("identifier `{text}` is not numeric")),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UsersResponseDto {
    pub(super) page: u32,
    pub(super) total_pages: u32,
    #[serde(default)]
    pub(super) links: PageLinks,
    #[serde(default)]
    pub(super) users: Vec<UserDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: IdDto,
    pub(super) name: String,
    pub(super) email: String,
    pub(super) phone: String,
    pub(super) position: String,
    pub(super) registration_timestamp: i64,
    pub(super) photo: String,
}

impl UsersResponseDto {
    pub(super) fn into_domain_page(self, request: &PageRequest) -> Result<UsersPage, ApiError> {
        let users = self
            .users
            .into_iter()
            .map(UserDto::into_domain_user)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| ApiError::network(format!("malformed user: {error}")))?;
        Page::new(self.page, self.total_pages, self.links, users)
            .and_then(|page| page.ensure_fits(request))
            .map_err(|error| ApiError::network(format!("malformed users page: {error}")))
    }
}

impl UserDto {
    fn into_domain_user(self) -> Result<User, String> {
        Ok(User {
            id: UserId::new(self.id.into_u64()?),
            name: self.name,
            email: self.email,
            phone: self.phone,
            position: self.position,
            photo: self.photo,
            registration_timestamp: self.registration_timestamp,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PositionsResponseDto {
    #[serde(default)]
    pub(super) positions: Vec<PositionDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PositionDto {
    pub(super) id: u32,
    pub(super) name: String,
}

impl PositionsResponseDto {
    pub(super) fn into_domain_positions(self) -> Vec<Position> {
        self.positions
            .into_iter()
            .map(|dto| Position {
                id: PositionId::new(dto.id),
                name: dto.name,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponseDto {
    pub(super) token: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RegistrationResponseDto {
    #[serde(default)]
    pub(super) user_id: Option<IdDto>,
    #[serde(default)]
    pub(super) message: Option<String>,
}

impl RegistrationResponseDto {
    pub(super) fn into_receipt(self) -> Result<RegistrationReceipt, ApiError> {
        let user_id = self
            .user_id
            .map(IdDto::into_u64)
            .transpose()
            .map_err(|error| ApiError::network(format!("malformed receipt: {error}")))?
            .map(UserId::new);
        Ok(RegistrationReceipt {
            user_id,
            message: self.message,
        })
    }
}

/// Error payload returned alongside 4xx statuses.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorResponseDto {
    #[serde(default)]
    pub(super) message: Option<String>,
}
