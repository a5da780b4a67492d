//! Service-layer error types shared by the write path and the admin API.

use sea_orm::DbErr;
use thiserror::Error;

/// Errors surfaced by the service layer.
///
/// Database errors are classified on the way in: unique-constraint
/// violations become [`ServiceError::Conflict`] and foreign-key violations
/// become [`ServiceError::Protected`], so callers never have to sniff
/// driver messages themselves.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Referenced record does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Input rejected before any persistence attempt.
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Unique constraint violated; surfaced to the caller, never retried.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Deletion blocked because other records still reference the target.
    #[error("protected: {0}")]
    Protected(String),

    /// Operation disallowed by the admin permission policy.
    #[error("{action} is not permitted for {entity}")]
    PermissionDenied {
        entity: &'static str,
        action: &'static str,
    },

    /// Any other database failure.
    #[error("database error: {0}")]
    Database(DbErr),
}

impl ServiceError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        match &err {
            DbErr::RecordNotFound(_) => Self::NotFound("record"),
            DbErr::Exec(runtime) | DbErr::Query(runtime) => {
                let message = runtime.to_string();
                let lowered = message.to_lowercase();
                if lowered.contains("unique constraint") {
                    Self::Conflict(message)
                } else if lowered.contains("foreign key constraint") {
                    Self::Protected(message)
                } else {
                    Self::Database(err)
                }
            }
            _ => Self::Database(err),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    #[test]
    fn unique_violations_become_conflicts() {
        let err = DbErr::Exec(RuntimeErr::Internal(
            "UNIQUE constraint failed: categories.slug".to_string(),
        ));
        assert!(matches!(ServiceError::from(err), ServiceError::Conflict(_)));
    }

    #[test]
    fn foreign_key_violations_become_protected() {
        let err = DbErr::Query(RuntimeErr::Internal(
            "FOREIGN KEY constraint failed".to_string(),
        ));
        assert!(matches!(
            ServiceError::from(err),
            ServiceError::Protected(_)
        ));
    }

    #[test]
    fn other_errors_stay_database_errors() {
        let err = DbErr::Custom("boom".to_string());
        assert!(matches!(ServiceError::from(err), ServiceError::Database(_)));
    }
}
