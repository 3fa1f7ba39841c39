//! Shared response envelope types for API handlers.
//!
//! Client-facing responses use a `{ "data": ... }` envelope. The controller
//! poll endpoint is the exception: firmware reads its body flat.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
