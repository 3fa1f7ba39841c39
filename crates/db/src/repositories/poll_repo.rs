//! Controller polling: unlock delivery and adaptive check-in intervals.

use latchkey_core::error::CoreError;
use latchkey_core::polling::{next_interval, BASE_INTERVAL_SECS};
use latchkey_core::unlock::POLL_AFTER_UNLOCK_SECS;

use crate::models::poll::PollResponse;
use crate::repositories::{RequestRepo, UnlockRepo};
use crate::store::modify;
use crate::Database;

/// Answers controller polls.
pub struct PollRepo;

impl PollRepo {
    /// Seconds the controller should wait before polling `lock_id` again.
    ///
    /// Ends the lock's active session when activity has gone stale.
    /// Unknown locks get the base interval.
    pub fn next_interval(db: &Database, lock_id: &str) -> u32 {
        let has_live_request = RequestRepo::has_live_request_for(db, lock_id);
        let now = db.now();

        let decision = modify(db.locks.as_ref(), &lock_id.to_string(), |lock| {
            let decision = next_interval(lock.activity(), has_live_request, now);
            if decision.end_session {
                lock.active_session = false;
            }
            decision
        });

        match decision {
            Some(decision) => {
                if decision.end_session {
                    tracing::debug!(lock_id, "Active session timed out");
                }
                tracing::debug!(
                    lock_id,
                    interval = decision.interval_secs,
                    has_live_request,
                    "Scheduled next poll",
                );
                decision.interval_secs
            }
            None => BASE_INTERVAL_SECS,
        }
    }

    /// Handle one controller poll.
    ///
    /// A waiting unlock is consumed and answered with a fixed short
    /// follow-up; otherwise the adaptive interval applies.
    pub fn poll(db: &Database, lock_id: &str) -> Result<PollResponse, CoreError> {
        if UnlockRepo::take_pending(db, lock_id)? {
            tracing::info!(lock_id, "Unlock delivered to controller");
            return Ok(PollResponse {
                unlock: true,
                next_check_in: POLL_AFTER_UNLOCK_SECS,
            });
        }

        Ok(PollResponse {
            unlock: false,
            next_check_in: Self::next_interval(db, lock_id),
        })
    }
}
