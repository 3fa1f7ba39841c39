use axum::routing::get;
use axum::Router;

use crate::handlers::controller;
use crate::state::AppState;

/// Controller polling route.
///
/// ```text
/// GET /check-unlock/{lock_id} -> check_unlock
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/check-unlock/{lock_id}", get(controller::check_unlock))
}
