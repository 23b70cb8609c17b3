//! Driven port for reference data and registration submission.
//!
//! Positions, upload tokens, and submissions live behind one port because the
//! submission endpoint only accepts a token minted by the same API.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{Position, PositionId, RegistrationDraft, RegistrationReceipt, UploadToken};

/// Port for the positions list, upload tokens, and registration submission.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PositionsApi: Send + Sync {
    /// Fetch the selectable positions in server order.
    async fn fetch_positions(&self) -> Result<Vec<Position>, ApiError>;

    /// Fetch a fresh upload token.
    ///
    /// Tokens are single-use or short-lived; callers must request one
    /// immediately before every submission attempt and never cache it.
    async fn fetch_upload_token(&self) -> Result<UploadToken, ApiError>;

    /// Submit a validated registration authorised by `token`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the server rejects the content
    /// with an explanation, and [`ApiError::Network`] otherwise.
    async fn submit_registration(
        &self,
        draft: &RegistrationDraft,
        token: &UploadToken,
    ) -> Result<RegistrationReceipt, ApiError>;
}

/// Fixture offering a fixed positions list and accepting every submission.
#[derive(Debug, Clone)]
pub struct FixturePositionsApi {
    positions: Vec<Position>,
}

impl Default for FixturePositionsApi {
    fn default() -> Self {
        let positions = [
            (1, "Lawyer"),
            (2, "Content manager"),
            (3, "Security"),
            (4, "Designer"),
        ]
        .into_iter()
        .map(|(id, name)| Position {
            id: PositionId::new(id),
            name: name.to_owned(),
        })
        .collect();
        Self { positions }
    }
}

#[async_trait]
impl PositionsApi for FixturePositionsApi {
    async fn fetch_positions(&self) -> Result<Vec<Position>, ApiError> {
        Ok(self.positions.clone())
    }

    async fn fetch_upload_token(&self) -> Result<UploadToken, ApiError> {
        Ok(UploadToken::new("fixture-token"))
    }

    async fn submit_registration(
        &self,
        _draft: &RegistrationDraft,
        _token: &UploadToken,
    ) -> Result<RegistrationReceipt, ApiError> {
        Ok(RegistrationReceipt {
            user_id: None,
            message: Some("New user successfully registered".to_owned()),
        })
    }
}
