//! User records, keyed by public key.

use latchkey_core::types::{PublicKey, Timestamp};
use serde::Serialize;

/// Display name logged for keys that have no user record.
pub const UNKNOWN_USER_NAME: &str = "Unknown User";

/// A person (or device) identified by their public key.
///
/// Users live independently of locks: removing a key from a lock leaves
/// the user record in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub public_key: PublicKey,
    pub name: String,
    pub is_admin: bool,
    pub date_added: Timestamp,
    pub last_access: Option<Timestamp>,
}

impl User {
    pub fn new(public_key: PublicKey, name: String, is_admin: bool, now: Timestamp) -> Self {
        Self {
            public_key,
            name,
            is_admin,
            date_added: now,
            last_access: None,
        }
    }
}
