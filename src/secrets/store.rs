//! Secret-store accessor trait.

use async_trait::async_trait;

use super::error::{Result, SecretsError};
use super::map::SecretMap;

/// Read access to a versioned key/value secret store.
///
/// Implementations perform one round trip per call: no retries, no caching,
/// no background refresh. They must be safe to share between tasks, since the
/// client facade hands the same store to every caller.
///
/// # Errors
///
/// - [`SecretsError::LookupFailed`] for any failure of the read itself
///   (unreachable store, rejected token, nothing stored at the path)
/// - [`SecretsError::KeyNotFound`] when the read succeeds but the key is absent
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Read the full key/value map stored at `path`.
    async fn read_secret_map(&self, path: &str) -> Result<SecretMap>;

    /// Read one key from the map stored at `path`.
    ///
    /// Follows [`SecretMap::get_string`]: numbers and booleans are rendered,
    /// while null, array and object values count as absent.
    async fn read_secret_value(&self, path: &str, key: &str) -> Result<String> {
        let secrets = self.read_secret_map(path).await?;
        secrets.get_string(key).ok_or_else(|| SecretsError::key_not_found(path, key))
    }
}
