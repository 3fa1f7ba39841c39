//! Repository for locks: authorized keys, access log, activity.

use latchkey_core::error::CoreError;

use crate::models::lock::{
    AccessLogEntry, AuthorizedKey, Lock, LockRoster, ACCESS_LOG_VIEW_LIMIT,
};
use crate::models::user::UNKNOWN_USER_NAME;
use crate::store::modify;
use crate::Database;

const ENTITY: &str = "Lock";

/// Provides data access for locks.
pub struct LockRepo;

impl LockRepo {
    pub fn get(db: &Database, lock_id: &str) -> Option<Lock> {
        db.locks.get(&lock_id.to_string())
    }

    pub fn exists(db: &Database, lock_id: &str) -> bool {
        Self::get(db, lock_id).is_some()
    }

    pub fn count(db: &Database) -> usize {
        db.locks.len()
    }

    /// Provision a new lock. Fails with `Conflict` if the id is taken.
    pub fn insert(db: &Database, lock: Lock) -> Result<(), CoreError> {
        let id = lock.id.clone();
        db.locks
            .compare_and_swap(&id, None, lock)
            .map_err(|_| CoreError::Conflict(format!("Lock {id} already exists")))?;
        tracing::info!(lock_id = %id, "Lock provisioned");
        Ok(())
    }

    /// Whether `key` is on the lock's authorized list. Unknown locks authorize nobody.
    pub fn is_authorized(db: &Database, lock_id: &str, key: &str) -> bool {
        modify(db.locks.as_ref(), &lock_id.to_string(), |lock| {
            lock.is_authorized(key)
        })
        .unwrap_or(false)
    }

    /// Mark the lock as recently active.
    pub fn touch(db: &Database, lock_id: &str) -> Result<(), CoreError> {
        let now = db.now();
        modify(db.locks.as_ref(), &lock_id.to_string(), |lock| lock.touch(now))
            .ok_or_else(|| CoreError::not_found(ENTITY, lock_id))
    }

    /// Mark every lock that authorizes `key` as recently active.
    ///
    /// Returns the number of locks touched.
    pub fn touch_locks_holding(db: &Database, key: &str) -> usize {
        let now = db.now();
        db.locks
            .keys()
            .iter()
            .filter(|lock_id| {
                modify(db.locks.as_ref(), *lock_id, |lock| {
                    if lock.is_authorized(key) {
                        lock.touch(now);
                        true
                    } else {
                        false
                    }
                })
                .unwrap_or(false)
            })
            .count()
    }

    /// Locks on which `key` is the only authorized admin key.
    pub fn locks_solely_administered_by(db: &Database, key: &str) -> Vec<String> {
        let is_admin = |k: &str| {
            db.users
                .get(&k.to_string())
                .is_some_and(|user| user.is_admin)
        };
        if !is_admin(key) {
            return Vec::new();
        }

        db.locks
            .values()
            .into_iter()
            .filter(|lock| {
                lock.is_authorized(key)
                    && !lock
                        .authorized_keys
                        .iter()
                        .any(|k| k.as_str() != key && is_admin(k.as_str()))
            })
            .map(|lock| lock.id)
            .collect()
    }

    /// Authorize `key` on the lock.
    ///
    /// Fails with `NotFound` for an unknown lock and `Conflict` if the key
    /// is already authorized.
    pub fn add_key(db: &Database, lock_id: &str, key: &str) -> Result<(), CoreError> {
        let now = db.now();
        modify(db.locks.as_ref(), &lock_id.to_string(), |lock| {
            if lock.is_authorized(key) {
                return Err(CoreError::Conflict("Key is already authorized".into()));
            }
            lock.authorized_keys.push(key.to_string());
            lock.touch(now);
            Ok(())
        })
        .ok_or_else(|| CoreError::not_found(ENTITY, lock_id))??;

        tracing::info!(lock_id, public_key = key, "Key authorized");
        Ok(())
    }

    /// Revoke `key` from the lock.
    ///
    /// Refuses with `Conflict` when `key` belongs to an admin and no other
    /// admin key would remain authorized, so a lock can never be orphaned.
    pub fn remove_key(db: &Database, lock_id: &str, key: &str) -> Result<(), CoreError> {
        let now = db.now();
        let is_admin = |k: &str| {
            db.users
                .get(&k.to_string())
                .is_some_and(|user| user.is_admin)
        };

        let outcome = modify(db.locks.as_ref(), &lock_id.to_string(), |lock| {
            let Some(index) = lock.authorized_keys.iter().position(|k| k == key) else {
                return Err(CoreError::not_found("Authorized key", key));
            };

            if is_admin(key) {
                let other_admins = lock
                    .authorized_keys
                    .iter()
                    .filter(|k| k.as_str() != key && is_admin(k.as_str()))
                    .count();
                if other_admins == 0 {
                    return Err(CoreError::Conflict(
                        "Cannot remove the last admin key".into(),
                    ));
                }
            }

            lock.authorized_keys.remove(index);
            lock.touch(now);
            Ok(())
        })
        .ok_or_else(|| CoreError::not_found(ENTITY, lock_id))?;

        match &outcome {
            Ok(()) => tracing::info!(lock_id, public_key = key, "Key revoked"),
            Err(CoreError::Conflict(_)) => {
                tracing::warn!(lock_id, public_key = key, "Refused to revoke last admin key")
            }
            Err(_) => {}
        }
        outcome
    }

    /// Append an access-log entry and stamp the user's last access.
    pub fn log_access(
        db: &Database,
        lock_id: &str,
        key: &str,
        request_id: &str,
    ) -> Result<(), CoreError> {
        let now = db.now();
        let user_name = db
            .users
            .get(&key.to_string())
            .map(|user| user.name)
            .unwrap_or_else(|| UNKNOWN_USER_NAME.to_string());

        modify(db.locks.as_ref(), &lock_id.to_string(), |lock| {
            lock.access_log.push(AccessLogEntry {
                timestamp: now,
                public_key: key.to_string(),
                user_name,
                request_id: request_id.to_string(),
            });
        })
        .ok_or_else(|| CoreError::not_found(ENTITY, lock_id))?;

        db.users.update(&key.to_string(), &mut |user| {
            user.last_access = Some(now);
        });
        Ok(())
    }

    /// Authorized keys with user details plus the recent access log.
    ///
    /// Reading the roster counts as administrative activity.
    pub fn list_authorized(db: &Database, lock_id: &str) -> Result<LockRoster, CoreError> {
        let now = db.now();
        let (keys, recent_log) = modify(db.locks.as_ref(), &lock_id.to_string(), |lock| {
            lock.touch(now);
            (
                lock.authorized_keys.clone(),
                lock.recent_log(ACCESS_LOG_VIEW_LIMIT).to_vec(),
            )
        })
        .ok_or_else(|| CoreError::not_found(ENTITY, lock_id))?;

        let keys = keys
            .into_iter()
            .map(|public_key| match db.users.get(&public_key) {
                Some(user) => AuthorizedKey {
                    public_key,
                    name: user.name,
                    is_admin: user.is_admin,
                    date_added: Some(user.date_added),
                    last_access: user.last_access,
                },
                None => AuthorizedKey {
                    public_key,
                    name: UNKNOWN_USER_NAME.to_string(),
                    is_admin: false,
                    date_added: None,
                    last_access: None,
                },
            })
            .collect();

        Ok(LockRoster { keys, recent_log })
    }
}
