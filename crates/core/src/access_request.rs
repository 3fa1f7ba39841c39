//! Access request lifetime rules.
//!
//! Expiry is fixed at creation and checked lazily; nothing sweeps the
//! registry in the background.

use chrono::Duration;

use crate::types::Timestamp;

/// How long a freshly created access request stays usable.
pub const REQUEST_TTL_SECS: i64 = 5 * 60;

/// The absolute expiry for a request created at `created_at`.
pub fn request_expiry(created_at: Timestamp) -> Timestamp {
    created_at + Duration::seconds(REQUEST_TTL_SECS)
}

/// A request is expired from its expiry instant onwards.
pub fn is_expired_at(expires_at: Timestamp, now: Timestamp) -> bool {
    now >= expires_at
}
