//! End-to-end tests for the unlock flow: request, sign, verify, poll.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Duration;
use common::{
    admin, body_json, build_test_app, get, open_request, post_json, verify_as, Wallet, LOCK,
};
use latchkey_db::repositories::LockRepo;

// ---------------------------------------------------------------------------
// Test: create-request returns a request bound to the default lock
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_request_returns_challenge() {
    let app = build_test_app();
    let response = get(app.router, "/api/create-request").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];

    let request_id = data["requestId"].as_str().unwrap();
    assert_eq!(data["lockId"], LOCK);
    assert!(data["expiresAt"].is_string());
    assert_eq!(
        data["message"],
        format!("Unlock request for lock {LOCK} with request ID {request_id}")
    );
    assert!(data.get("mobileUrl").is_none());
}

#[tokio::test]
async fn create_request_for_unknown_lock_is_404() {
    let app = build_test_app();
    let response = get(app.router, "/api/create-request?lockId=ghost").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn access_link_points_at_mobile_page() {
    let app = build_test_app();
    let response = get(app.router, "/api/access-link").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let request_id = json["data"]["requestId"].as_str().unwrap();
    assert_eq!(
        json["data"]["mobileUrl"],
        format!("https://door.example/mobile-auth?requestId={request_id}&lockId={LOCK}")
    );
}

// ---------------------------------------------------------------------------
// Test: a valid signature unlocks exactly once
// ---------------------------------------------------------------------------

#[tokio::test]
async fn verified_request_unlocks_on_next_poll_only() {
    let app = build_test_app();
    let (request_id, message) = open_request(app.router.clone()).await;

    let response = verify_as(app.router.clone(), &admin(), &request_id, &message).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["granted"], true);

    let first = body_json(get(app.router.clone(), "/api/check-unlock/lock001").await).await;
    assert_eq!(first["unlock"], true);
    assert_eq!(first["nextCheckIn"], 5);

    let second = body_json(get(app.router, "/api/check-unlock/lock001").await).await;
    assert_eq!(second["unlock"], false);

    let log = LockRepo::get(&app.db, LOCK).unwrap().access_log;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].request_id, request_id);
    assert_eq!(log[0].user_name, "Admin");
}

#[tokio::test]
async fn base64_signature_is_accepted() {
    let app = build_test_app();
    let (request_id, message) = open_request(app.router.clone()).await;
    let wallet = admin();

    let response = post_json(
        app.router,
        "/api/verify",
        serde_json::json!({
            "requestId": request_id,
            "publicKey": wallet.public,
            "signature": wallet.sign_base64(&message),
            "message": message,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Test: rejection paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unlisted_key_is_forbidden() {
    let app = build_test_app();
    let (request_id, message) = open_request(app.router.clone()).await;

    let response = verify_as(app.router.clone(), &Wallet::new(7), &request_id, &message).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");

    let poll = body_json(get(app.router, "/api/check-unlock/lock001").await).await;
    assert_eq!(poll["unlock"], false);
}

#[tokio::test]
async fn forged_signature_is_rejected() {
    let app = build_test_app();
    let (request_id, message) = open_request(app.router.clone()).await;
    let impostor = Wallet::new(8);

    let response = post_json(
        app.router,
        "/api/verify",
        serde_json::json!({
            "requestId": request_id,
            "publicKey": admin().public,
            "signature": impostor.sign(&message),
            "message": message,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_SIGNATURE");
}

#[tokio::test]
async fn message_naming_another_request_is_rejected() {
    let app = build_test_app();
    let (request_id, _) = open_request(app.router.clone()).await;
    let message = format!("Unlock request for lock {LOCK} with request ID something-else");

    let response = verify_as(app.router, &admin(), &request_id, &message).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_SIGNATURE");
}

#[tokio::test]
async fn expired_request_is_gone() {
    let app = build_test_app();
    let (request_id, message) = open_request(app.router.clone()).await;

    app.clock.advance(Duration::seconds(301));
    let response = verify_as(app.router, &admin(), &request_id, &message).await;

    assert_eq!(response.status(), StatusCode::GONE);
    assert_eq!(body_json(response).await["code"], "EXPIRED");
}

#[tokio::test]
async fn unknown_request_is_404() {
    let app = build_test_app();
    let message = format!("Unlock request for lock {LOCK} with request ID nope");

    let response = verify_as(app.router, &admin(), "nope", &message).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn replayed_verification_is_404() {
    let app = build_test_app();
    let (request_id, message) = open_request(app.router.clone()).await;

    let first = verify_as(app.router.clone(), &admin(), &request_id, &message).await;
    assert_eq!(first.status(), StatusCode::OK);

    let replay = verify_as(app.router, &admin(), &request_id, &message).await;
    assert_eq!(replay.status(), StatusCode::NOT_FOUND);
    assert_eq!(LockRepo::get(&app.db, LOCK).unwrap().access_log.len(), 1);
}

#[tokio::test]
async fn missing_verify_fields_are_validation_errors() {
    let app = build_test_app();
    let response = post_json(
        app.router,
        "/api/verify",
        serde_json::json!({ "requestId": "abc" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: polling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn poll_of_unknown_lock_keeps_controller_polling() {
    let app = build_test_app();
    let response = get(app.router, "/api/check-unlock/ghost").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["nextCheckIn"], 30);
}

#[tokio::test]
async fn open_request_speeds_up_polling() {
    let app = build_test_app();
    app.clock.advance(Duration::minutes(10));

    let idle = body_json(get(app.router.clone(), "/api/check-unlock/lock001").await).await;
    assert_eq!(idle["nextCheckIn"], 30);

    // Opening a request is activity: the controller moves to the hot tier.
    open_request(app.router.clone()).await;
    let hot = body_json(get(app.router, "/api/check-unlock/lock001").await).await;
    assert_eq!(hot["nextCheckIn"], 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_polls_deliver_unlock_once() {
    let app = build_test_app();
    let (request_id, message) = open_request(app.router.clone()).await;
    let granted = verify_as(app.router.clone(), &admin(), &request_id, &message).await;
    assert_eq!(granted.status(), StatusCode::OK);

    let unlocks = Arc::new(AtomicUsize::new(0));
    let mut handles = Vec::new();
    for _ in 0..16 {
        let router = app.router.clone();
        let unlocks = Arc::clone(&unlocks);
        handles.push(tokio::spawn(async move {
            let json = body_json(get(router, "/api/check-unlock/lock001").await).await;
            if json["unlock"] == true {
                unlocks.fetch_add(1, Ordering::SeqCst);
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(unlocks.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_verifications_grant_once() {
    let app = build_test_app();
    let (request_id, message) = open_request(app.router.clone()).await;

    let mut handles = Vec::new();
    for _ in 0..16 {
        let router = app.router.clone();
        let request_id = request_id.clone();
        let message = message.clone();
        handles.push(tokio::spawn(async move {
            let response = verify_as(router, &admin(), &request_id, &message).await;
            response.status()
        }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }

    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1);
    assert!(statuses
        .iter()
        .all(|s| *s == StatusCode::OK || *s == StatusCode::NOT_FOUND));
    assert_eq!(LockRepo::get(&app.db, LOCK).unwrap().access_log.len(), 1);

    let first = body_json(get(app.router.clone(), "/api/check-unlock/lock001").await).await;
    assert_eq!(first["unlock"], true);
    let second = body_json(get(app.router, "/api/check-unlock/lock001").await).await;
    assert_eq!(second["unlock"], false);
}
