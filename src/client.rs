//! # Secrets Client
//!
//! The single entry point services use: one [`SecretsClient`] built at startup,
//! then `resolve_*` calls whenever a typed configuration is needed.
//!
//! ```rust,ignore
//! use gradeloop_secrets::SecretsClient;
//!
//! let client = SecretsClient::from_env().await?;
//! let db = client.resolve_database_config().await?;
//! let pool = sqlx::PgPool::connect(&db.url()).await?;
//! client.close()?;
//! ```

use std::sync::Arc;

use crate::config::{CacheConfig, ClientConfig, DatabaseConfig, TokenConfig};
use crate::secrets::{
    EnvSource, ProcessEnv, Resolver, Result, SecretMap, SecretStore, SecretsError, VaultStore,
};

/// Facade over the resolution policy and the secret store.
///
/// Holds only read-only state after construction: the [`ClientConfig`], the
/// store handle and the environment view. It is `Send + Sync` and can be
/// shared behind an `Arc` by concurrent request handlers.
///
/// The store connection is established once by [`SecretsClient::connect`] and
/// is not re-established after a failure; build a new client instead.
pub struct SecretsClient {
    config: ClientConfig,
    store: Option<Arc<dyn SecretStore>>,
    env: Arc<dyn EnvSource>,
}

impl SecretsClient {
    /// Connect to the configured secret store.
    ///
    /// With `use_env_secrets` set no store is contacted and the client runs in
    /// environment-only mode.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::Config`] for an empty or invalid address, or a missing
    ///   token without `allow_unauthenticated`
    /// - [`SecretsError::AuthenticationFailed`] if the store rejects the token
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        if config.use_env_secrets {
            return Ok(Self::env_only(config));
        }

        let store = VaultStore::connect(&config).await?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Load [`ClientConfig`] from the environment and connect.
    pub async fn from_env() -> Result<Self> {
        Self::connect(ClientConfig::from_env()?).await
    }

    /// Client that resolves every typed configuration from environment
    /// variables and has no store.
    pub fn env_only(config: ClientConfig) -> Self {
        tracing::info!("Secrets client running in environment-only mode");
        Self { config, store: None, env: Arc::new(ProcessEnv) }
    }

    /// Client over an already constructed store.
    pub fn with_store(config: ClientConfig, store: Arc<dyn SecretStore>) -> Self {
        Self { config, store: Some(store), env: Arc::new(ProcessEnv) }
    }

    /// Replace the environment view (the process environment by default).
    pub fn with_env(mut self, env: Arc<dyn EnvSource>) -> Self {
        self.env = env;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether this client has no secret store.
    pub fn is_env_only(&self) -> bool {
        self.store.is_none()
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self.env.as_ref(), self.store.as_deref())
    }

    fn store(&self) -> Result<&dyn SecretStore> {
        self.store
            .as_deref()
            .ok_or_else(|| SecretsError::config_error("No secret store configured"))
    }

    pub async fn resolve_database_config(&self) -> Result<DatabaseConfig> {
        self.resolver().resolve_database_config().await
    }

    pub async fn resolve_cache_config(&self) -> Result<CacheConfig> {
        self.resolver().resolve_cache_config().await
    }

    pub async fn resolve_token_config(&self) -> Result<TokenConfig> {
        self.resolver().resolve_token_config().await
    }

    /// Raw secret map for `services/{name}`.
    pub async fn resolve_named_secret_map(&self, name: &str) -> Result<SecretMap> {
        self.resolver().resolve_named_secret_map(name).await
    }

    /// Raw secret map at an arbitrary store path.
    pub async fn read_secret_map(&self, path: &str) -> Result<SecretMap> {
        self.store()?.read_secret_map(path).await
    }

    /// Single value at an arbitrary store path.
    pub async fn read_secret_value(&self, path: &str, key: &str) -> Result<String> {
        self.store()?.read_secret_value(path, key).await
    }

    /// Release the client.
    ///
    /// The HTTP transport needs no teardown, so this always succeeds; it exists
    /// so callers can treat the client like any other scoped resource.
    pub fn close(self) -> Result<()> {
        tracing::debug!(env_only = self.is_env_only(), "Secrets client closed");
        Ok(())
    }
}
