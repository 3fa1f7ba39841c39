//! Resolution of a signed access request into a granted unlock.
//!
//! Steps, in order, each terminal on failure:
//!
//! 1. Look up the request (`NotFound`).
//! 2. Reject and delete it if expired (`Expired`).
//! 3. Check the key is on the target lock's list (`Unauthorized`). The
//!    request stays pending so another key can retry it.
//! 4. Check the signed message names this request and its lock, then
//!    verify the signature (`InvalidSignature`). The request stays pending.
//! 5. Consume the request, log the access, and raise the lock's unlock flag.
//!
//! Consumption is a single delete on the registry: if two submissions for
//! the same request race past step 4, only the one whose delete succeeds is
//! granted and the other sees `NotFound`.

use latchkey_core::error::CoreError;
use latchkey_core::signature::{parse_challenge_message, verify_signature};
use latchkey_db::repositories::{LockRepo, RequestRepo, UnlockRepo};
use latchkey_db::Database;

/// A client's claim that it signed the challenge for a request.
#[derive(Debug, Clone)]
pub struct SignedAccess<'a> {
    pub request_id: &'a str,
    pub public_key: &'a str,
    pub signature: &'a str,
    pub message: &'a str,
}

/// A successfully resolved request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub lock_id: String,
    pub request_id: String,
}

/// Run the resolution protocol for one submission.
pub fn resolve_access(db: &Database, access: &SignedAccess<'_>) -> Result<Grant, CoreError> {
    let request_id = access.request_id;
    let request = RequestRepo::get(db, request_id)
        .ok_or_else(|| CoreError::not_found("Access request", request_id))?;

    if request.is_expired_at(db.now()) {
        RequestRepo::delete(db, request_id);
        tracing::warn!(request_id, lock_id = %request.lock_id, "Access request expired");
        return Err(CoreError::Expired("Access request has expired".into()));
    }

    if !LockRepo::is_authorized(db, &request.lock_id, access.public_key) {
        tracing::warn!(
            request_id,
            lock_id = %request.lock_id,
            public_key = access.public_key,
            "Key not authorized for lock",
        );
        return Err(CoreError::Unauthorized("Unauthorized public key".into()));
    }

    let binds_request = parse_challenge_message(access.message).is_some_and(|ids| {
        ids.lock_id == request.lock_id && ids.request_id == request.id
    });
    if !binds_request {
        tracing::warn!(request_id, "Signed message does not name this request");
        return Err(CoreError::InvalidSignature);
    }

    if !verify_signature(access.message.as_bytes(), access.signature, access.public_key) {
        tracing::warn!(request_id, public_key = access.public_key, "Invalid signature");
        return Err(CoreError::InvalidSignature);
    }

    if !RequestRepo::delete(db, request_id) {
        return Err(CoreError::not_found("Access request", request_id));
    }

    LockRepo::log_access(db, &request.lock_id, access.public_key, request_id)?;
    UnlockRepo::set_pending(db, &request.lock_id, true)?;

    tracing::info!(
        request_id,
        lock_id = %request.lock_id,
        public_key = access.public_key,
        "Access granted",
    );

    Ok(Grant {
        lock_id: request.lock_id,
        request_id: request.id,
    })
}
