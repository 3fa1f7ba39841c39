//! Multi-step protocols that span several repositories.
//!
//! - [`verification`] -- resolving a signed access request into an unlock.

pub mod verification;
