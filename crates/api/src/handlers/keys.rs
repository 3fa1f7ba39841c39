//! Admin handlers for a lock's authorized keys and their users.
//!
//! All endpoints require an admin credential via [`RequireAdmin`].

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use latchkey_db::repositories::{LockRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::access::LockQuery;
use crate::handlers::{not_blank, validate};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct AddKeyInput {
    pub lock_id: Option<String>,
    #[validate(length(min = 1))]
    pub public_key: String,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub is_admin: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoveKeyInput {
    pub lock_id: Option<String>,
    #[validate(length(min = 1))]
    pub public_key: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RenameInput {
    #[validate(length(min = 1))]
    pub public_key: String,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct Added {
    pub added: bool,
}

#[derive(Debug, Serialize)]
pub struct Removed {
    pub removed: bool,
}

#[derive(Debug, Serialize)]
pub struct Renamed {
    pub renamed: bool,
}

fn lock_or_default(lock_id: Option<String>, state: &AppState) -> String {
    lock_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| state.config.default_lock_id().to_string())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/keys
///
/// Authorized keys with user details, plus the most recent access log.
pub async fn list_keys(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<LockQuery>,
) -> AppResult<impl IntoResponse> {
    let lock_id = lock_or_default(query.lock_id, &state);
    let roster = LockRepo::list_authorized(&state.db, &lock_id)?;
    Ok(Json(DataResponse { data: roster }))
}

/// POST /api/keys/add
///
/// Authorize a key on a lock and create or update its user record.
/// Both checks run before any write, so a rejected add leaves the user
/// untouched. Demoting a key that is the last admin on any lock is refused.
pub async fn add_key(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<AddKeyInput>,
) -> AppResult<impl IntoResponse> {
    validate(&input)?;
    let lock_id = lock_or_default(input.lock_id, &state);
    let name = input.name.trim();

    UserRepo::ensure_admin_change_allowed(&state.db, &input.public_key, input.is_admin)?;
    LockRepo::add_key(&state.db, &lock_id, &input.public_key)?;
    UserRepo::upsert(&state.db, &input.public_key, name, input.is_admin);

    tracing::info!(
        lock_id = %lock_id,
        public_key = %input.public_key,
        is_admin = input.is_admin,
        added_by = %admin.public_key,
        "Admin added key",
    );

    Ok(Json(DataResponse {
        data: Added { added: true },
    }))
}

/// POST /api/keys/remove
///
/// Revoke a key from a lock. The user record is kept.
pub async fn remove_key(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<RemoveKeyInput>,
) -> AppResult<impl IntoResponse> {
    validate(&input)?;
    let lock_id = lock_or_default(input.lock_id, &state);

    LockRepo::remove_key(&state.db, &lock_id, &input.public_key)?;

    tracing::info!(
        lock_id = %lock_id,
        public_key = %input.public_key,
        removed_by = %admin.public_key,
        "Admin revoked key",
    );

    Ok(Json(DataResponse {
        data: Removed { removed: true },
    }))
}

/// POST /api/keys/rename
pub async fn rename_user(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<RenameInput>,
) -> AppResult<impl IntoResponse> {
    validate(&input)?;
    UserRepo::rename(&state.db, &input.public_key, input.name.trim())?;
    Ok(Json(DataResponse {
        data: Renamed { renamed: true },
    }))
}
