//! Handler for lock controllers polling for unlock commands.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use latchkey_core::error::CoreError;
use latchkey_core::polling::BASE_INTERVAL_SECS;
use latchkey_db::repositories::PollRepo;
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/check-unlock/{lock_id}
///
/// Replies flat (`{unlock, nextCheckIn}`) rather than in the data envelope.
/// An unknown lock still gets a `nextCheckIn` so a misconfigured controller
/// keeps polling at the base rate instead of hammering the server.
pub async fn check_unlock(
    State(state): State<AppState>,
    Path(lock_id): Path<String>,
) -> Response {
    match PollRepo::poll(&state.db, &lock_id) {
        Ok(reply) => Json(reply).into_response(),
        Err(err @ CoreError::NotFound { .. }) => {
            let (status, code, message) = AppError::Core(err).classify();
            let body = json!({
                "error": message,
                "code": code,
                "nextCheckIn": BASE_INTERVAL_SECS,
            });
            (status, Json(body)).into_response()
        }
        Err(err) => AppError::Core(err).into_response(),
    }
}
