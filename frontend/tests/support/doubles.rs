//! Recording test doubles for the driven ports.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use frontend::domain::ports::{
    ApiError, Dimensions, ImageProbe, ImageProbeError, PositionsApi, UsersApi,
};
use frontend::domain::{
    Position, PositionId, RegistrationDraft, RegistrationReceipt, UploadToken, UserId, UsersPage,
};
use pagination::PageRequest;

/// Serves canned pages by number and records every requested page.
#[derive(Clone, Default)]
pub struct RecordingUsersApi {
    pages: BTreeMap<u32, UsersPage>,
    requested: Arc<Mutex<Vec<u32>>>,
}

impl RecordingUsersApi {
    /// Serve `pages`, keyed by their page number.
    pub fn serving(pages: impl IntoIterator<Item = UsersPage>) -> Self {
        Self {
            pages: pages.into_iter().map(|page| (page.page(), page)).collect(),
            requested: Arc::default(),
        }
    }

    /// Page numbers requested so far, in call order.
    pub fn requested(&self) -> Vec<u32> {
        self.requested.lock().expect("requested lock").clone()
    }
}

#[async_trait]
impl UsersApi for RecordingUsersApi {
    async fn fetch_users(&self, request: PageRequest) -> Result<UsersPage, ApiError> {
        self.requested
            .lock()
            .expect("requested lock")
            .push(request.page());
        self.pages
            .get(&request.page())
            .cloned()
            .ok_or_else(|| ApiError::network("status 404: Page not found"))
    }
}

/// One recorded positions API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionsCall {
    /// `GET /positions`.
    Positions,
    /// `GET /token`.
    Token,
    /// `POST /users` with the token it carried.
    Submit {
        /// Token attached to the submission.
        token: String,
        /// Phone number sent.
        phone: String,
    },
}

/// Offers two positions, mints numbered tokens, and records every call.
#[derive(Clone)]
pub struct RecordingPositionsApi {
    calls: Arc<Mutex<Vec<PositionsCall>>>,
    rejection: Option<ApiError>,
}

impl RecordingPositionsApi {
    /// Accept every submission.
    pub fn accepting() -> Self {
        Self {
            calls: Arc::default(),
            rejection: None,
        }
    }

    /// Reject every submission with `error`.
    pub fn rejecting(error: ApiError) -> Self {
        Self {
            calls: Arc::default(),
            rejection: Some(error),
        }
    }

    /// Calls recorded so far, in call order.
    pub fn calls(&self) -> Vec<PositionsCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: PositionsCall) -> usize {
        let mut calls = self.calls.lock().expect("calls lock");
        calls.push(call);
        calls.len()
    }
}

#[async_trait]
impl PositionsApi for RecordingPositionsApi {
    async fn fetch_positions(&self) -> Result<Vec<Position>, ApiError> {
        self.record(PositionsCall::Positions);
        Ok(vec![
            Position {
                id: PositionId::new(1),
                name: "Lawyer".to_owned(),
            },
            Position {
                id: PositionId::new(4),
                name: "Designer".to_owned(),
            },
        ])
    }

    async fn fetch_upload_token(&self) -> Result<UploadToken, ApiError> {
        let sequence = self.record(PositionsCall::Token);
        Ok(UploadToken::new(format!("token-{sequence}")))
    }

    async fn submit_registration(
        &self,
        draft: &RegistrationDraft,
        token: &UploadToken,
    ) -> Result<RegistrationReceipt, ApiError> {
        self.record(PositionsCall::Submit {
            token: token.expose().to_owned(),
            phone: draft.phone.to_string(),
        });
        match &self.rejection {
            Some(error) => Err(error.clone()),
            None => Ok(RegistrationReceipt {
                user_id: Some(UserId::new(99)),
                message: Some("New user successfully registered".to_owned()),
            }),
        }
    }
}

/// Reports the same dimensions for every image.
#[derive(Debug, Clone, Copy)]
pub struct StubProbe(pub Dimensions);

#[async_trait]
impl ImageProbe for StubProbe {
    async fn dimensions(&self, _bytes: &[u8]) -> Result<Dimensions, ImageProbeError> {
        Ok(self.0)
    }
}
