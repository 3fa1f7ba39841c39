use latchkey_db::bootstrap::Provisioning;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Public origin of the web client, used for mobile hand-off links.
    pub public_base_url: String,
    /// The lock and admin seeded at startup. Its lock id is also the
    /// default target for new access requests.
    pub provisioning: Provisioning,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `PUBLIC_BASE_URL`      | `http://localhost:3000`    |
    /// | `DEFAULT_LOCK_ID`      | `lock001`                  |
    /// | `DEFAULT_LOCK_NAME`    | `Test Lock`                |
    /// | `BOOTSTRAP_ADMIN_KEY`  | required                   |
    /// | `BOOTSTRAP_ADMIN_NAME` | `Admin`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let provisioning = Provisioning {
            lock_id: std::env::var("DEFAULT_LOCK_ID").unwrap_or_else(|_| "lock001".into()),
            lock_name: std::env::var("DEFAULT_LOCK_NAME").unwrap_or_else(|_| "Test Lock".into()),
            admin_key: std::env::var("BOOTSTRAP_ADMIN_KEY")
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            admin_name: std::env::var("BOOTSTRAP_ADMIN_NAME").unwrap_or_else(|_| "Admin".into()),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            public_base_url,
            provisioning,
        }
    }

    /// The lock that new access requests target when none is named.
    pub fn default_lock_id(&self) -> &str {
        &self.provisioning.lock_id
    }
}
