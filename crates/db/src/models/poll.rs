//! Controller poll replies.

use serde::Serialize;

/// What a polling controller should do next.
///
/// Serialized flat (`{"unlock": .., "nextCheckIn": ..}`) because controller
/// firmware parses it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResponse {
    pub unlock: bool,
    pub next_check_in: u32,
}
