//! Error types for secret resolution.

use thiserror::Error;

/// Result type for secrets operations.
pub type Result<T> = std::result::Result<T, SecretsError>;

/// Errors surfaced by the secret-store accessor, the resolvers and the client facade.
///
/// Store-specific error shapes never cross this boundary: transport, authorization
/// and not-found failures during a read are all flattened into
/// [`SecretsError::LookupFailed`].
#[derive(Error, Debug)]
pub enum SecretsError {
    /// Required input missing or invalid at construction time.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The secret store rejected the configured credential.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// A secret-store read failed (unreachable, forbidden, or no secret at the path).
    #[error("Secret lookup failed at path '{path}': {cause}")]
    LookupFailed { path: String, cause: String },

    /// The read succeeded but the requested key is absent from the map.
    #[error("Key '{key}' not found in secret path '{path}'")]
    KeyNotFound { path: String, key: String },
}

impl SecretsError {
    /// Create a config error.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Create an authentication failed error.
    pub fn authentication_failed(message: impl Into<String>) -> Self {
        Self::AuthenticationFailed { message: message.into() }
    }

    /// Create a lookup failed error.
    pub fn lookup_failed(path: impl Into<String>, cause: impl Into<String>) -> Self {
        Self::LookupFailed { path: path.into(), cause: cause.into() }
    }

    /// Create a key not found error.
    pub fn key_not_found(path: impl Into<String>, key: impl Into<String>) -> Self {
        Self::KeyNotFound { path: path.into(), key: key.into() }
    }

    /// Path the failed operation was addressing, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::LookupFailed { path, .. } | Self::KeyNotFound { path, .. } => Some(path),
            Self::Config { .. } | Self::AuthenticationFailed { .. } => None,
        }
    }
}
