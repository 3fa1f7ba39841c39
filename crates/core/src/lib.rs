//! Domain logic for the latchkey access service.
//!
//! Everything in this crate is pure: decision functions take the current
//! time as an argument and never touch shared state, so the storage and
//! HTTP layers can call them under whatever locking they need.

pub mod access_request;
pub mod clock;
pub mod error;
pub mod polling;
pub mod signature;
pub mod types;
pub mod unlock;
