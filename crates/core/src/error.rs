// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Database failure that is NOT a connectivity problem (bad statement,
    /// constraint violation, decode error). Passed through to the caller
    /// untouched by any retry or pool-reset logic.
    #[error("Database error: {0}")]
    Database(String),

    /// The database could not be reached after the pool exhausted its
    /// bounded reconnect attempts, or the session broke mid-query.
    /// Always chains the underlying driver failure.
    #[error("Database is temporarily unavailable")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether the caller should treat this failure as retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Unavailable(_))
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// Note: sqlx::Error conversion is handled in the infra-sqlite crate
// (orphan rules prevent a From impl here, and core must stay driver-free)

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_carries_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = AppError::Unavailable(Box::new(cause));

        assert!(err.is_retryable());
        let source = std::error::Error::source(&err).expect("cause must be chained");
        assert!(source.to_string().contains("refused"));
    }

    #[test]
    fn test_database_error_is_not_retryable() {
        let err = AppError::Database("UNIQUE constraint failed: users.username".to_string());
        assert!(!err.is_retryable());
    }
}
