//! HashiCorp Vault secret store.
//!
//! Reads from Vault's KV v2 secrets engine through `vaultrs`.
//!
//! # Configuration
//!
//! Driven entirely by [`ClientConfig`]:
//! - Vault server address
//! - Authentication token (verified once, at construction)
//! - Optional namespace for multi-tenancy
//! - KV v2 mount path (default: "secret")
//! - Request timeout and TLS verification
//!
//! # Example
//!
//! ```rust,ignore
//! use gradeloop_secrets::{ClientConfig, SecretStore, VaultStore};
//!
//! let store = VaultStore::connect(&ClientConfig::from_env()?).await?;
//! let secrets = store.read_secret_map("database/postgres").await?;
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use vaultrs::client::{VaultClient, VaultClientSettingsBuilder};
use vaultrs::kv2;

use super::error::{Result, SecretsError};
use super::map::SecretMap;
use super::store::SecretStore;
use crate::config::ClientConfig;

/// Vault KV v2 backed [`SecretStore`].
///
/// # Thread Safety
///
/// The underlying `VaultClient` wraps a `reqwest` client, which pools
/// connections internally and is safe to share across tasks. This type holds no
/// other state, so it is `Send + Sync` without any locking.
pub struct VaultStore {
    client: VaultClient,
    mount_path: String,
}

impl VaultStore {
    /// Build a Vault client and authenticate it.
    ///
    /// Authentication is a single token self-lookup. When the configuration
    /// carries no token and `allow_unauthenticated` is set, the lookup is
    /// skipped and the store proceeds without credentials.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::Config`] if the configuration is invalid
    /// - [`SecretsError::AuthenticationFailed`] if Vault rejects the token or
    ///   cannot be reached to verify it
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut settings_builder = VaultClientSettingsBuilder::default();
        settings_builder
            .address(&config.address)
            .timeout(Some(config.timeout()))
            .verify(config.tls_verify)
            .token(config.token.expose_secret());

        if let Some(namespace) = config.namespace() {
            settings_builder.namespace(Some(namespace.to_string()));
        }

        let settings = settings_builder.build().map_err(|e| {
            SecretsError::config_error(format!("Invalid Vault configuration: {}", e))
        })?;

        let client = VaultClient::new(settings).map_err(|e| {
            SecretsError::config_error(format!("Failed to create Vault client: {}", e))
        })?;

        if config.token.is_empty() {
            tracing::warn!(
                vault_addr = %config.address,
                "No Vault token configured, continuing unauthenticated"
            );
        } else {
            match vaultrs::token::lookup_self(&client).await {
                Ok(_) => {
                    tracing::info!(vault_addr = %config.address, "Authenticated with Vault");
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        vault_addr = %config.address,
                        "Vault authentication failed"
                    );
                    return Err(SecretsError::authentication_failed(format!(
                        "Vault rejected the configured token: {}",
                        e
                    )));
                }
            }
        }

        Ok(Self { client, mount_path: config.mount_path.clone() })
    }

    /// KV v2 mount this store reads from.
    pub fn mount_path(&self) -> &str {
        &self.mount_path
    }
}

#[async_trait]
impl SecretStore for VaultStore {
    async fn read_secret_map(&self, path: &str) -> Result<SecretMap> {
        let data: HashMap<String, serde_json::Value> =
            kv2::read(&self.client, &self.mount_path, path).await.map_err(|e| {
                tracing::warn!(
                    error = %e,
                    mount_path = %self.mount_path,
                    path = %path,
                    "Failed to read secret from Vault"
                );
                SecretsError::lookup_failed(path, e.to_string())
            })?;

        tracing::debug!(path = %path, keys = data.len(), "Read secret map from Vault");
        Ok(SecretMap::from(data))
    }
}
