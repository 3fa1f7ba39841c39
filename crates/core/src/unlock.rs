//! Unlock-pending window rules.
//!
//! A granted unlock is a one-shot signal the controller picks up on its
//! next poll. If no poll arrives within [`UNLOCK_WINDOW_SECS`] the signal
//! lapses on its own.

use chrono::Duration;

use crate::types::Timestamp;

/// How long a granted unlock waits for the controller before lapsing.
pub const UNLOCK_WINDOW_SECS: i64 = 30;

/// Poll interval handed back together with an unlock instruction.
pub const POLL_AFTER_UNLOCK_SECS: u32 = 5;

/// The instant a pending unlock set at `now` stops being deliverable.
pub fn unlock_expiry(now: Timestamp) -> Timestamp {
    now + Duration::seconds(UNLOCK_WINDOW_SECS)
}

/// Whether an unlock flag is still deliverable at `now`.
///
/// A flag without an expiry never lapses.
pub fn is_pending_at(flag: bool, expires_at: Option<Timestamp>, now: Timestamp) -> bool {
    flag && expires_at.map_or(true, |expires| now < expires)
}
