//! Route definitions for key administration.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::keys;
use crate::state::AppState;

/// Admin routes mounted at `/keys`.
///
/// ```text
/// GET  /       -> list_keys
/// POST /add    -> add_key
/// POST /remove -> remove_key
/// POST /rename -> rename_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(keys::list_keys))
        .route("/add", post(keys::add_key))
        .route("/remove", post(keys::remove_key))
        .route("/rename", post(keys::rename_user))
}
