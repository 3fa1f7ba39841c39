//! Authorization extractors.
//!
//! - [`rbac::RequireAdmin`] -- Requires a credential the configured
//!   [`AdminAuthenticator`](crate::auth::admin::AdminAuthenticator) accepts.

pub mod rbac;
