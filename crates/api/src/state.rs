use std::sync::Arc;

use latchkey_db::Database;

use crate::auth::admin::AdminAuthenticator;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Entity stores for locks, users, and access requests.
    pub db: Database,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Decides which callers may use the admin endpoints.
    pub admin_auth: Arc<dyn AdminAuthenticator>,
}
