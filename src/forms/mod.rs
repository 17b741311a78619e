//! Caller-facing input shapes and their conversion into domain values.
//!
//! Forms are deserialized from whatever the caller received, checked with
//! `validator`, then turned into domain types whose constructors enforce the
//! remaining invariants.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;
use crate::services::ServiceError;

pub mod chains;
pub mod locations;
pub mod places;
pub mod profiles;

/// Failure to turn a form into domain values.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("form validation failed: {0}")]
    Validation(String),
    #[error("form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for FormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for FormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        ServiceError::InvalidInput(val.to_string())
    }
}

/// Missing and blank strings both mean "no value".
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
