//! Admin capability checks.
//!
//! The admin endpoints accept whatever credential the caller presents in
//! the `Authorization: Bearer` header and hand it to an
//! [`AdminAuthenticator`]. The stock [`BearerKeyAuthenticator`] treats the
//! credential as a public key and trusts it if the key belongs to an admin
//! user; it does not prove possession of the key. A scheme that does (for
//! example, a signed per-call challenge) can be swapped in through
//! [`AppState`](crate::state::AppState) without touching the handlers.

use latchkey_core::error::CoreError;
use latchkey_db::models::user::User;
use latchkey_db::repositories::UserRepo;
use latchkey_db::Database;

/// Resolves a presented credential to an admin user.
pub trait AdminAuthenticator: Send + Sync {
    /// Returns the admin user, or `Unauthorized` if the credential does not
    /// grant admin capability.
    fn authenticate(&self, db: &Database, credential: &str) -> Result<User, CoreError>;
}

/// Accepts a base58 public key whose user record carries the admin flag.
#[derive(Debug, Default, Clone, Copy)]
pub struct BearerKeyAuthenticator;

impl AdminAuthenticator for BearerKeyAuthenticator {
    fn authenticate(&self, db: &Database, credential: &str) -> Result<User, CoreError> {
        UserRepo::get(db, credential)
            .filter(|user| user.is_admin)
            .ok_or_else(|| CoreError::Unauthorized("Admin access required".into()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use latchkey_core::clock::SystemClock;

    use super::*;

    #[test]
    fn only_admin_users_pass() {
        let db = Database::in_memory(Arc::new(SystemClock));
        UserRepo::upsert(&db, "boss", "Boss", true);
        UserRepo::upsert(&db, "guest", "Guest", false);

        let auth = BearerKeyAuthenticator;
        assert_eq!(auth.authenticate(&db, "boss").unwrap().name, "Boss");
        assert_matches!(
            auth.authenticate(&db, "guest"),
            Err(CoreError::Unauthorized(_))
        );
        assert_matches!(
            auth.authenticate(&db, "nobody"),
            Err(CoreError::Unauthorized(_))
        );
    }
}
