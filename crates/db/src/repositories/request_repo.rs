//! Repository for access requests (the request registry).
//!
//! Expiry is evaluated lazily on lookup; the registry never sweeps.

use latchkey_core::access_request::request_expiry;
use latchkey_core::error::CoreError;
use uuid::Uuid;

use crate::models::access_request::{AccessRequest, CreatedRequest, RequestStatus};
use crate::repositories::LockRepo;
use crate::Database;

/// Provides data access for access requests.
pub struct RequestRepo;

impl RequestRepo {
    /// Open a new request against `lock_id`, valid for five minutes.
    ///
    /// Fails with `NotFound` if the lock is unknown.
    pub fn create(db: &Database, lock_id: &str) -> Result<CreatedRequest, CoreError> {
        if !LockRepo::exists(db, lock_id) {
            return Err(CoreError::not_found("Lock", lock_id));
        }

        let now = db.now();
        let request = loop {
            let candidate = AccessRequest {
                id: Uuid::new_v4().to_string(),
                lock_id: lock_id.to_string(),
                created_at: now,
                expires_at: request_expiry(now),
                status: RequestStatus::Pending,
            };
            if db
                .requests
                .compare_and_swap(&candidate.id, None, candidate.clone())
                .is_ok()
            {
                break candidate;
            }
        };

        LockRepo::touch(db, lock_id)?;

        tracing::info!(
            lock_id,
            request_id = %request.id,
            expires_at = %request.expires_at,
            "Access request created",
        );

        Ok(CreatedRequest {
            request_id: request.id,
            lock_id: request.lock_id,
            expires_at: request.expires_at,
        })
    }

    pub fn get(db: &Database, request_id: &str) -> Option<AccessRequest> {
        db.requests.get(&request_id.to_string())
    }

    /// Unknown requests count as expired.
    pub fn is_expired(db: &Database, request_id: &str) -> bool {
        let now = db.now();
        Self::get(db, request_id).map_or(true, |request| request.is_expired_at(now))
    }

    /// Remove a request. Returns whether anything was removed.
    pub fn delete(db: &Database, request_id: &str) -> bool {
        db.requests.remove(&request_id.to_string()).is_some()
    }

    /// Whether any live (pending, unexpired) request targets `lock_id`.
    pub fn has_live_request_for(db: &Database, lock_id: &str) -> bool {
        let now = db.now();
        db.requests
            .values()
            .iter()
            .any(|request| request.lock_id == lock_id && request.is_live_at(now))
    }
}
