//! Authentication and authorization primitives.
//!
//! - [`admin`] -- the pluggable capability check behind the admin endpoints.

pub mod admin;
