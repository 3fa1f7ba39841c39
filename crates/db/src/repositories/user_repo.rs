//! Repository for user records.

use latchkey_core::error::CoreError;

use crate::models::user::User;
use crate::repositories::LockRepo;
use crate::store::modify;
use crate::Database;

/// Provides data access for users.
pub struct UserRepo;

impl UserRepo {
    pub fn get(db: &Database, key: &str) -> Option<User> {
        db.users.get(&key.to_string())
    }

    /// Create or update the user behind `key`. Always succeeds.
    ///
    /// An existing record keeps its `date_added` and `last_access`.
    pub fn upsert(db: &Database, key: &str, name: &str, is_admin: bool) -> User {
        let key = key.to_string();
        loop {
            let updated = modify(db.users.as_ref(), &key, |user| {
                user.name = name.to_string();
                user.is_admin = is_admin;
                user.clone()
            });
            if let Some(user) = updated {
                return user;
            }

            let user = User::new(key.clone(), name.to_string(), is_admin, db.now());
            if db.users.compare_and_swap(&key, None, user.clone()).is_ok() {
                tracing::info!(public_key = %key, is_admin, "User created");
                return user;
            }
            // Lost a race with a concurrent insert; update theirs instead.
        }
    }

    /// Refuse to clear the admin flag of a user who is the last admin key
    /// on some lock.
    pub fn ensure_admin_change_allowed(
        db: &Database,
        key: &str,
        is_admin: bool,
    ) -> Result<(), CoreError> {
        if is_admin {
            return Ok(());
        }
        let orphaned = LockRepo::locks_solely_administered_by(db, key);
        if orphaned.is_empty() {
            return Ok(());
        }
        tracing::warn!(public_key = key, locks = ?orphaned, "Refused to demote last admin");
        Err(CoreError::Conflict(format!(
            "Key is the last admin on lock(s): {}",
            orphaned.join(", ")
        )))
    }

    /// Change a user's display name and refresh activity on every lock
    /// that authorizes them.
    pub fn rename(db: &Database, key: &str, name: &str) -> Result<(), CoreError> {
        modify(db.users.as_ref(), &key.to_string(), |user| {
            user.name = name.to_string();
        })
        .ok_or_else(|| CoreError::not_found("User", key))?;

        let touched = LockRepo::touch_locks_holding(db, key);
        tracing::info!(public_key = key, locks = touched, "User renamed");
        Ok(())
    }
}
