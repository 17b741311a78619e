use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::repository::RepositoryError;

/// Error kinds surfaced to callers of the service layer.
///
/// Callers map these onto their own responses; this crate never produces
/// transport-level status codes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested or referenced row does not exist.
    #[error("not found")]
    NotFound,
    /// A uniqueness constraint rejected the write.
    #[error("duplicate key")]
    DuplicateKey,
    /// Caller-supplied data was missing or out of range.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The write contradicts state recorded earlier.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Any other store failure. Details are logged, not returned.
    #[error("store failure")]
    StoreFailure,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::InvalidInput(val.to_string())
    }
}

/// Classify a repository error, logging anything that is not a caller error.
pub(crate) fn store_error(action: &str, err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::NotFound | RepositoryError::ForeignKeyViolation(_) => {
            ServiceError::NotFound
        }
        RepositoryError::DuplicateKey(detail) => {
            log::warn!("Failed to {action}: {detail}");
            ServiceError::DuplicateKey
        }
        other => {
            log::error!("Failed to {action}: {other}");
            ServiceError::StoreFailure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_repository_errors() {
        assert_eq!(
            store_error("test", RepositoryError::NotFound),
            ServiceError::NotFound
        );
        assert_eq!(
            store_error("test", RepositoryError::ForeignKeyViolation("fk".into())),
            ServiceError::NotFound
        );
        assert_eq!(
            store_error("test", RepositoryError::DuplicateKey("email".into())),
            ServiceError::DuplicateKey
        );
        assert_eq!(
            store_error("test", RepositoryError::ConnectionError("timeout".into())),
            ServiceError::StoreFailure
        );
    }

    #[test]
    fn type_constraints_become_invalid_input() {
        let err: ServiceError = TypeConstraintError::EmptyString("user_id").into();
        assert_eq!(err, ServiceError::InvalidInput("user_id cannot be empty".into()));
    }
}
