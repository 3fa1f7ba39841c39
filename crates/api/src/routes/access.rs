//! Route definitions for unlocking clients.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::access;
use crate::state::AppState;

/// Access request routes mounted at the `/api` root.
///
/// ```text
/// GET  /create-request -> create_request
/// GET  /access-link    -> access_link
/// POST /verify         -> verify
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-request", get(access::create_request))
        .route("/access-link", get(access::access_link))
        .route("/verify", post(access::verify))
}
