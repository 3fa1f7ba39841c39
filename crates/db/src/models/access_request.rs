//! Short-lived access requests.

use latchkey_core::access_request::is_expired_at;
use latchkey_core::types::{LockId, RequestId, Timestamp};
use serde::Serialize;

/// Lifecycle state of a stored request.
///
/// Requests leave the registry by deletion, so a stored request is always
/// pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
}

/// An unlock attempt bound to one lock, valid until `expires_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequest {
    pub id: RequestId,
    pub lock_id: LockId,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub status: RequestStatus,
}

impl AccessRequest {
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        is_expired_at(self.expires_at, now)
    }

    /// Pending and not yet expired.
    pub fn is_live_at(&self, now: Timestamp) -> bool {
        self.status == RequestStatus::Pending && !self.is_expired_at(now)
    }
}

/// Handle returned to the client that asked for a new request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRequest {
    pub request_id: RequestId,
    pub lock_id: LockId,
    pub expires_at: Timestamp,
}
