//! Admin-only access extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use latchkey_core::error::CoreError;
use latchkey_db::models::user::User;

use crate::error::AppError;
use crate::state::AppState;

/// Requires an admin credential in the `Authorization: Bearer` header.
///
/// Rejects with 401 when the header is missing or malformed and 403 when
/// the credential does not carry admin capability.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     // admin is guaranteed to be an admin user here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthenticated(
                    "Missing Authorization header".into(),
                ))
            })?;

        let credential = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthenticated(
                    "Invalid Authorization format. Expected: Bearer <public key>".into(),
                ))
            })?;

        let admin = state.admin_auth.authenticate(&state.db, credential)?;
        Ok(RequireAdmin(admin))
    }
}
