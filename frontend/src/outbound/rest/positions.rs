//! Reqwest-backed positions API: positions, upload tokens, and submissions.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use super::client::{ApiClient, decode, map_status_error, map_transport_error};
use super::dto::{
    ErrorResponseDto, PositionsResponseDto, RegistrationResponseDto, TokenResponseDto,
};
use crate::domain::photo::PHOTO_MIME_TYPE;
use crate::domain::ports::{ApiError, PositionsApi};
use crate::domain::{Position, RegistrationDraft, RegistrationReceipt, UploadToken};

/// Header carrying the upload token on `POST /users`.
const TOKEN_HEADER: &str = "Token";

/// Positions API adapter.
#[derive(Debug, Clone)]
pub struct RestPositionsApi {
    client: ApiClient,
}

impl RestPositionsApi {
    /// Build the adapter on a shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PositionsApi for RestPositionsApi {
    async fn fetch_positions(&self) -> Result<Vec<Position>, ApiError> {
        let url = self.client.endpoint("positions")?;
        let dto: PositionsResponseDto = self.client.get_json(url).await?;
        Ok(dto.into_domain_positions())
    }

    async fn fetch_upload_token(&self) -> Result<UploadToken, ApiError> {
        let url = self.client.endpoint("token")?;
        let dto: TokenResponseDto = self.client.get_json(url).await?;
        Ok(UploadToken::new(dto.token))
    }

    async fn submit_registration(
        &self,
        draft: &RegistrationDraft,
        token: &UploadToken,
    ) -> Result<RegistrationReceipt, ApiError> {
        let url = self.client.endpoint("users")?;
        let form = registration_form(draft)?;
        debug!(%url, "POST");
        let response = self
            .client
            .http()
            .post(url)
            .header(TOKEN_HEADER, token.expose())
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_submission_error(status, body.as_ref()));
        }
        let dto: RegistrationResponseDto = decode(body.as_ref())?;
        dto.into_receipt()
    }
}

fn registration_form(draft: &RegistrationDraft) -> Result<Form, ApiError> {
    let candidate = draft.photo.candidate();
    let photo = Part::bytes(candidate.bytes().to_vec())
        .file_name(candidate.file_name().to_owned())
        .mime_str(PHOTO_MIME_TYPE)
        .map_err(|error| ApiError::network(format!("invalid photo part: {error}")))?;
    Ok(Form::new()
        .text("name", String::from(draft.name.clone()))
        .text("email", String::from(draft.email.clone()))
        .text("phone", String::from(draft.phone.clone()))
        .text("position_id", draft.position_id.to_string())
        .part("photo", photo))
}

/// 4xx responses carrying a `{message}` body are shown to the user verbatim;
/// everything else is a network failure.
fn map_submission_error(status: StatusCode, body: &[u8]) -> ApiError {
    if status.is_client_error() {
        let message = serde_json::from_slice::<ErrorResponseDto>(body)
            .ok()
            .and_then(|dto| dto.message)
            .filter(|message| !message.trim().is_empty());
        if let Some(message) = message {
            return ApiError::validation(message);
        }
    }
    map_status_error(status, body)
}
