//! Unlock coordination between a granted request and the polling controller.

use latchkey_core::error::CoreError;
use latchkey_core::unlock::{is_pending_at, unlock_expiry};

use crate::store::modify;
use crate::Database;

/// Reads and writes a lock's one-shot unlock flag.
pub struct UnlockRepo;

impl UnlockRepo {
    /// Raise (`true`) or clear (`false`) the unlock flag.
    ///
    /// Raising stamps a 30-second delivery window; either way the lock's
    /// activity is refreshed.
    pub fn set_pending(db: &Database, lock_id: &str, pending: bool) -> Result<(), CoreError> {
        let now = db.now();
        modify(db.locks.as_ref(), &lock_id.to_string(), |lock| {
            lock.unlock_pending = pending;
            lock.unlock_expires_at = pending.then(|| unlock_expiry(now));
            if pending {
                lock.last_access_at = Some(now);
            }
            lock.touch(now);
        })
        .ok_or_else(|| CoreError::not_found("Lock", lock_id))
    }

    /// Whether an unlock is waiting and its window has not lapsed.
    pub fn is_pending(db: &Database, lock_id: &str) -> bool {
        let now = db.now();
        modify(db.locks.as_ref(), &lock_id.to_string(), |lock| {
            is_pending_at(lock.unlock_pending, lock.unlock_expires_at, now)
        })
        .unwrap_or(false)
    }

    /// Consume a deliverable unlock, clearing the flag in the same step.
    ///
    /// Of any number of concurrent callers for one lock, at most one sees
    /// `true` for a given grant.
    pub fn take_pending(db: &Database, lock_id: &str) -> Result<bool, CoreError> {
        let now = db.now();
        modify(db.locks.as_ref(), &lock_id.to_string(), |lock| {
            if !is_pending_at(lock.unlock_pending, lock.unlock_expires_at, now) {
                return false;
            }
            lock.unlock_pending = false;
            lock.unlock_expires_at = None;
            lock.touch(now);
            true
        })
        .ok_or_else(|| CoreError::not_found("Lock", lock_id))
    }
}
