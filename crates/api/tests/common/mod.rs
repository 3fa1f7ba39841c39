#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use ed25519_dalek::{Signer, SigningKey};
use http_body_util::BodyExt;
use tower::ServiceExt;

use latchkey_api::auth::admin::BearerKeyAuthenticator;
use latchkey_api::config::ServerConfig;
use latchkey_api::router::build_app_router;
use latchkey_api::state::AppState;
use latchkey_core::clock::ManualClock;
use latchkey_db::bootstrap::{self, Provisioning};
use latchkey_db::Database;

pub const LOCK: &str = "lock001";

/// A deterministic ed25519 keypair, encoded the way wallets present it.
pub struct Wallet {
    signing: SigningKey,
    pub public: String,
}

impl Wallet {
    pub fn new(seed: u8) -> Self {
        let signing = SigningKey::from_bytes(&[seed; 32]);
        let public = bs58::encode(signing.verifying_key().as_bytes()).into_string();
        Self { signing, public }
    }

    /// Hex-encoded signature over `message`.
    pub fn sign(&self, message: &str) -> String {
        hex::encode(self.signing.sign(message.as_bytes()).to_bytes())
    }

    pub fn sign_base64(&self, message: &str) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD
            .encode(self.signing.sign(message.as_bytes()).to_bytes())
    }
}

/// The key seeded as the lock's first admin.
pub fn admin() -> Wallet {
    Wallet::new(1)
}

/// Build a test `ServerConfig` with safe defaults and the admin wallet
/// provisioned on [`LOCK`].
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        public_base_url: "https://door.example".to_string(),
        provisioning: Provisioning {
            lock_id: LOCK.to_string(),
            lock_name: "Test Lock".to_string(),
            admin_key: Some(admin().public),
            admin_name: "Admin".to_string(),
        },
    }
}

/// Everything a test needs to drive the app and steer time.
pub struct TestApp {
    pub router: Router,
    pub db: Database,
    pub clock: Arc<ManualClock>,
}

/// Build the full application router over a freshly provisioned in-memory
/// database, with the same middleware stack production uses.
pub fn build_test_app() -> TestApp {
    let config = test_config();
    let clock = Arc::new(ManualClock::starting_now());
    let db = Database::in_memory(clock.clone());
    bootstrap::seed(&db, &config.provisioning).unwrap();

    let state = AppState {
        db: db.clone(),
        config: Arc::new(config.clone()),
        admin_auth: Arc::new(BearerKeyAuthenticator),
    };

    TestApp {
        router: build_app_router(state, &config),
        db,
        clock,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, key: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header("authorization", format!("Bearer {key}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    key: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {key}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Open a request on [`LOCK`] and return `(request_id, message)`.
pub async fn open_request(app: Router) -> (String, String) {
    let json = body_json(get(app, "/api/create-request").await).await;
    (
        json["data"]["requestId"].as_str().unwrap().to_string(),
        json["data"]["message"].as_str().unwrap().to_string(),
    )
}

/// Submit a signed verification as `wallet`.
pub async fn verify_as(
    app: Router,
    wallet: &Wallet,
    request_id: &str,
    message: &str,
) -> Response<Body> {
    post_json(
        app,
        "/api/verify",
        serde_json::json!({
            "requestId": request_id,
            "publicKey": wallet.public,
            "signature": wallet.sign(message),
            "message": message,
        }),
    )
    .await
}
