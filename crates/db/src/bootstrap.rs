//! Startup provisioning of the default lock and its first admin.

use latchkey_core::error::CoreError;

use crate::models::lock::Lock;
use crate::repositories::{LockRepo, UserRepo};
use crate::Database;

/// What to provision when the service starts.
#[derive(Debug, Clone)]
pub struct Provisioning {
    pub lock_id: String,
    pub lock_name: String,
    /// Base58 key of the initial admin. Required unless the lock already
    /// holds an admin key.
    pub admin_key: Option<String>,
    pub admin_name: String,
}

/// Ensure the provisioned lock exists and that the admin key is a user
/// with admin rights authorized on it. Safe to run twice.
///
/// Without an admin key the lock could never be administered, so seeding
/// fails unless the lock already holds an admin key.
pub fn seed(db: &Database, provisioning: &Provisioning) -> Result<(), CoreError> {
    let lock_id = provisioning.lock_id.as_str();

    let Some(admin_key) = provisioning.admin_key.as_deref() else {
        if has_admin(db, lock_id) {
            return Ok(());
        }
        tracing::error!(lock_id, "No bootstrap admin key configured");
        return Err(CoreError::Validation(
            "BOOTSTRAP_ADMIN_KEY must be set to provision the first admin".into(),
        ));
    };

    if !LockRepo::exists(db, lock_id) {
        let lock = Lock::new(
            provisioning.lock_id.clone(),
            provisioning.lock_name.clone(),
            db.now(),
        );
        LockRepo::insert(db, lock)?;
    }

    UserRepo::upsert(db, admin_key, &provisioning.admin_name, true);
    if !LockRepo::is_authorized(db, lock_id, admin_key) {
        LockRepo::add_key(db, lock_id, admin_key)?;
    }

    tracing::info!(lock_id, admin_key, "Bootstrap provisioning complete");
    Ok(())
}

fn has_admin(db: &Database, lock_id: &str) -> bool {
    LockRepo::get(db, lock_id).is_some_and(|lock| {
        lock.authorized_keys
            .iter()
            .any(|key| UserRepo::get(db, key).is_some_and(|user| user.is_admin))
    })
}
