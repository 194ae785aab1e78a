//! # Error Handling
//!
//! Application-level error type for the example service. Library callers
//! mostly deal with [`SecretsError`] directly; this type wraps it together with
//! the database and I/O failures the service can hit at startup.

use crate::secrets::SecretsError;

/// Custom result type for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the example service
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Secret resolution errors
    #[error(transparent)]
    Secrets(#[from] SecretsError),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secrets_error_is_transparent() {
        let err: Error = SecretsError::lookup_failed("auth/jwt", "permission denied").into();
        assert_eq!(
            err.to_string(),
            "Secret lookup failed at path 'auth/jwt': permission denied"
        );
    }

    #[test]
    fn test_error_helpers() {
        assert_eq!(Error::config("bad port").to_string(), "Configuration error: bad port");
        assert!(matches!(Error::config("boom"), Error::Config(_)));
    }
}
