//! Request handlers.
//!
//! Each submodule provides the async handlers for one client of the
//! service. Handlers delegate to the repositories in `latchkey_db` (or the
//! [`engine`](crate::engine)) and map errors via [`AppError`].

pub mod access;
pub mod controller;
pub mod keys;

use latchkey_core::error::CoreError;
use validator::{Validate, ValidationError};

use crate::error::AppError;

/// Run `validator` rules on a request body, mapping failures to a 400
/// `VALIDATION_ERROR` that names the offending fields.
pub(crate) fn validate<T: Validate>(input: &T) -> Result<(), AppError> {
    input.validate().map_err(|errors| {
        let mut fields: Vec<_> = errors
            .field_errors()
            .into_keys()
            .map(|f| f.to_string())
            .collect();
        fields.sort();
        AppError::Core(CoreError::Validation(format!(
            "Missing or invalid fields: {}",
            fields.join(", ")
        )))
    })
}

/// Rejects strings that are empty once surrounding whitespace is removed.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
