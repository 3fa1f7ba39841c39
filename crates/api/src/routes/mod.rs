pub mod access;
pub mod controller;
pub mod health;
pub mod keys;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /create-request                  open an access request (GET)
/// /access-link                     open a request with a mobile hand-off link (GET)
/// /verify                          submit a signed request (POST)
///
/// /check-unlock/{lock_id}          controller poll (GET)
///
/// /keys                            roster and recent log (GET, admin only)
/// /keys/add                        authorize a key (POST, admin only)
/// /keys/remove                     revoke a key (POST, admin only)
/// /keys/rename                     rename a user (POST, admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(access::router())
        .merge(controller::router())
        .nest("/keys", keys::router())
}
