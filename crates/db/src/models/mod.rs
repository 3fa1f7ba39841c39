//! Entity models and read-side DTOs.

pub mod access_request;
pub mod lock;
pub mod poll;
pub mod user;
