//! Handlers for the unlocking client: access requests and verification.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use latchkey_core::signature::challenge_message;
use latchkey_core::types::{LockId, RequestId, Timestamp};
use latchkey_db::models::access_request::CreatedRequest;
use latchkey_db::repositories::RequestRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::engine::verification::{resolve_access, SignedAccess};
use crate::error::AppResult;
use crate::handlers::validate;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Optional `?lockId=` selector. Absent means the provisioned lock.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockQuery {
    pub lock_id: Option<String>,
}

impl LockQuery {
    fn resolve<'a>(&'a self, state: &'a AppState) -> &'a str {
        self.lock_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| state.config.default_lock_id())
    }
}

/// A freshly created request plus the exact text the client must sign.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResponse {
    pub request_id: RequestId,
    pub lock_id: LockId,
    pub expires_at: Timestamp,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_url: Option<String>,
}

impl From<CreatedRequest> for ChallengeResponse {
    fn from(created: CreatedRequest) -> Self {
        Self {
            message: challenge_message(&created.lock_id, &created.request_id),
            request_id: created.request_id,
            lock_id: created.lock_id,
            expires_at: created.expires_at,
            mobile_url: None,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct VerifyInput {
    #[validate(length(min = 1))]
    pub request_id: String,
    #[validate(length(min = 1))]
    pub public_key: String,
    #[validate(length(min = 1))]
    pub signature: String,
    #[validate(length(min = 1))]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub granted: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/create-request
///
/// Open a five-minute access request against a lock.
pub async fn create_request(
    State(state): State<AppState>,
    Query(query): Query<LockQuery>,
) -> AppResult<impl IntoResponse> {
    let created = RequestRepo::create(&state.db, query.resolve(&state))?;
    Ok(Json(DataResponse {
        data: ChallengeResponse::from(created),
    }))
}

/// GET /api/access-link
///
/// Same as [`create_request`], plus a link a phone can open to sign the
/// challenge with its wallet.
pub async fn access_link(
    State(state): State<AppState>,
    Query(query): Query<LockQuery>,
) -> AppResult<impl IntoResponse> {
    let created = RequestRepo::create(&state.db, query.resolve(&state))?;
    let mobile_url = format!(
        "{}/mobile-auth?requestId={}&lockId={}",
        state.config.public_base_url, created.request_id, created.lock_id,
    );

    let mut response = ChallengeResponse::from(created);
    response.mobile_url = Some(mobile_url);
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/verify
///
/// Resolve a signed request. On success the lock's controller receives an
/// unlock on its next poll.
pub async fn verify(
    State(state): State<AppState>,
    Json(input): Json<VerifyInput>,
) -> AppResult<impl IntoResponse> {
    validate(&input)?;

    resolve_access(
        &state.db,
        &SignedAccess {
            request_id: &input.request_id,
            public_key: &input.public_key,
            signature: &input.signature,
            message: &input.message,
        },
    )?;

    Ok(Json(DataResponse {
        data: VerifyResponse { granted: true },
    }))
}
