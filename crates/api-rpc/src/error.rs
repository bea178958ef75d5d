//! RPC Error Types
//!
//! Maps application errors to JSON-RPC error codes.

use jsonrpsee::types::ErrorObjectOwned;
use userhub_core::error::AppError;

/// RPC Error Codes
pub mod code {
    pub const VALIDATION_ERROR: i32 = 4000;
    pub const NOT_FOUND: i32 = 4001;
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const DB_ERROR: i32 = 5001;
    /// Retryable: the database is temporarily unreachable
    pub const DB_UNAVAILABLE: i32 = 5003;
}

/// Client-facing message for the unavailable condition. Deliberately
/// uniform: infrastructure detail stays in the server logs.
pub const DB_UNAVAILABLE_MESSAGE: &str =
    "Database is temporarily unavailable. Please retry later.";

/// Convert AppError to a JSON-RPC ErrorObject
pub fn to_rpc_error(err: AppError) -> ErrorObjectOwned {
    match err {
        AppError::Domain(e) => {
            ErrorObjectOwned::owned(code::VALIDATION_ERROR, e.to_string(), None::<()>)
        }
        AppError::Validation(msg) => {
            ErrorObjectOwned::owned(code::VALIDATION_ERROR, msg, None::<()>)
        }
        AppError::NotFound(msg) => ErrorObjectOwned::owned(code::NOT_FOUND, msg, None::<()>),
        AppError::Unavailable(_) => ErrorObjectOwned::owned(
            code::DB_UNAVAILABLE,
            DB_UNAVAILABLE_MESSAGE.to_string(),
            None::<()>,
        ),
        AppError::Database(msg) => ErrorObjectOwned::owned(code::DB_ERROR, msg, None::<()>),
        AppError::Config(msg) => ErrorObjectOwned::owned(code::INTERNAL_ERROR, msg, None::<()>),
        AppError::Internal(msg) => ErrorObjectOwned::owned(code::INTERNAL_ERROR, msg, None::<()>),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_maps_to_retryable_code() {
        let err = AppError::Unavailable(Box::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "refused",
        )));
        let rpc = to_rpc_error(err);
        assert_eq!(rpc.code(), code::DB_UNAVAILABLE);
        assert_eq!(rpc.message(), DB_UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn test_database_error_keeps_specific_message() {
        let rpc = to_rpc_error(AppError::Database(
            "Unique constraint violation: users.username".to_string(),
        ));
        assert_eq!(rpc.code(), code::DB_ERROR);
        assert!(rpc.message().contains("users.username"));
    }
}
