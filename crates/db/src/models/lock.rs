//! Lock entities, their access log, and the admin roster view.

use latchkey_core::polling::ActivitySnapshot;
use latchkey_core::types::{LockId, PublicKey, RequestId, Timestamp};
use serde::Serialize;

/// Number of access-log entries exposed to readers.
pub const ACCESS_LOG_VIEW_LIMIT: usize = 20;

/// One physical access point and its authorization state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lock {
    pub id: LockId,
    pub name: String,
    /// Insertion-ordered, no duplicates.
    pub authorized_keys: Vec<PublicKey>,
    /// Append-only.
    pub access_log: Vec<AccessLogEntry>,
    pub unlock_pending: bool,
    pub unlock_expires_at: Option<Timestamp>,
    pub active_session: bool,
    pub last_activity_at: Timestamp,
    /// When an unlock was last granted.
    pub last_access_at: Option<Timestamp>,
}

impl Lock {
    pub fn new(id: LockId, name: String, now: Timestamp) -> Self {
        Self {
            id,
            name,
            authorized_keys: Vec::new(),
            access_log: Vec::new(),
            unlock_pending: false,
            unlock_expires_at: None,
            active_session: false,
            last_activity_at: now,
            last_access_at: None,
        }
    }

    /// Record activity that should speed up the controller's polling.
    pub fn touch(&mut self, now: Timestamp) {
        self.last_activity_at = now;
        self.active_session = true;
    }

    pub fn is_authorized(&self, key: &str) -> bool {
        self.authorized_keys.iter().any(|k| k == key)
    }

    pub fn activity(&self) -> ActivitySnapshot {
        ActivitySnapshot {
            active_session: self.active_session,
            last_activity_at: self.last_activity_at,
        }
    }

    /// The newest `limit` log entries, oldest first.
    pub fn recent_log(&self, limit: usize) -> &[AccessLogEntry] {
        let start = self.access_log.len().saturating_sub(limit);
        &self.access_log[start..]
    }
}

/// A granted unlock, as recorded at the moment of granting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessLogEntry {
    pub timestamp: Timestamp,
    pub public_key: PublicKey,
    /// The user's display name when the entry was written.
    pub user_name: String,
    pub request_id: RequestId,
}

/// An authorized key joined with its user record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizedKey {
    pub public_key: PublicKey,
    pub name: String,
    pub is_admin: bool,
    pub date_added: Option<Timestamp>,
    pub last_access: Option<Timestamp>,
}

/// Admin view of a lock: who may open it and who recently did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockRoster {
    pub keys: Vec<AuthorizedKey>,
    pub recent_log: Vec<AccessLogEntry>,
}
