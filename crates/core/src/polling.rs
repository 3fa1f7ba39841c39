//! Adaptive poll interval computation.
//!
//! Controllers poll instead of receiving pushes, so the server tells them
//! how long to wait before asking again. Recent administrative or
//! authentication activity shortens the interval; outstanding access
//! requests cap it so a granted unlock is picked up quickly.

use chrono::Duration;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Intervals (seconds)
// ---------------------------------------------------------------------------

/// Interval for an idle lock, and for locks the server does not know.
pub const BASE_INTERVAL_SECS: u32 = 30;

/// Interval while activity is fresh (under [`HOT_WINDOW_SECS`]).
pub const HOT_INTERVAL_SECS: u32 = 5;

/// Interval while activity is cooling (under [`WARM_WINDOW_SECS`]).
pub const WARM_INTERVAL_SECS: u32 = 15;

/// Upper bound while any unexpired access request targets the lock.
pub const PENDING_REQUEST_CAP_SECS: u32 = 10;

// ---------------------------------------------------------------------------
// Activity windows (seconds since last activity)
// ---------------------------------------------------------------------------

pub const HOT_WINDOW_SECS: i64 = 2 * 60;

/// Past this age the active session is considered over.
pub const WARM_WINDOW_SECS: i64 = 5 * 60;

/// Activity state of a lock as seen by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivitySnapshot {
    pub active_session: bool,
    pub last_activity_at: Timestamp,
}

/// Outcome of a scheduling decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollDecision {
    pub interval_secs: u32,
    /// The active session has gone quiet and should be cleared on the lock.
    pub end_session: bool,
}

/// Compute the next poll interval for a lock.
pub fn next_interval(
    activity: ActivitySnapshot,
    has_pending_request: bool,
    now: Timestamp,
) -> PollDecision {
    let mut interval = BASE_INTERVAL_SECS;
    let mut end_session = false;

    if activity.active_session {
        let elapsed = now - activity.last_activity_at;
        if elapsed < Duration::seconds(HOT_WINDOW_SECS) {
            interval = interval.min(HOT_INTERVAL_SECS);
        } else if elapsed < Duration::seconds(WARM_WINDOW_SECS) {
            interval = interval.min(WARM_INTERVAL_SECS);
        } else {
            end_session = true;
        }
    }

    if has_pending_request {
        interval = interval.min(PENDING_REQUEST_CAP_SECS);
    }

    PollDecision {
        interval_secs: interval,
        end_session,
    }
}
