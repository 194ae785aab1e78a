//! # Secret Store Client Configuration
//!
//! Connection settings for the secret store, built once at startup either from
//! [`Default`] or from the `VAULT_*` environment variables.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::secrets::env::{EnvSource, ProcessEnv};
use crate::secrets::error::{Result, SecretsError};
use crate::secrets::types::SecretString;

pub const VAULT_ADDR: &str = "VAULT_ADDR";
pub const VAULT_TOKEN: &str = "VAULT_TOKEN";
pub const VAULT_NAMESPACE: &str = "VAULT_NAMESPACE";
pub const VAULT_MOUNT_PATH: &str = "VAULT_MOUNT_PATH";
pub const VAULT_TIMEOUT: &str = "VAULT_TIMEOUT";
pub const VAULT_VERIFY_SSL: &str = "VAULT_VERIFY_SSL";
pub const VAULT_ALLOW_UNAUTHENTICATED: &str = "VAULT_ALLOW_UNAUTHENTICATED";
pub const USE_ENV_SECRETS: &str = "USE_ENV_SECRETS";

const DEFAULT_ADDRESS: &str = "http://localhost:8200";
const DEFAULT_MOUNT_PATH: &str = "secret";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Secret store client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Store address (e.g., "https://vault.example.com:8200")
    pub address: String,

    /// Authentication token (redacted in logs and serialization)
    #[serde(default)]
    pub token: SecretString,

    /// Enterprise namespace, empty for none
    #[serde(default)]
    pub namespace: String,

    /// KV v2 mount path (default: "secret")
    #[serde(default = "default_mount_path")]
    pub mount_path: String,

    /// Request timeout handed to the transport
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Verify the store's TLS certificate
    #[serde(default)]
    pub tls_verify: bool,

    /// Resolve every typed configuration from environment variables and never
    /// contact the store
    #[serde(default)]
    pub use_env_secrets: bool,

    /// Permit connecting without a token (local development only)
    #[serde(default)]
    pub allow_unauthenticated: bool,
}

fn default_mount_path() -> String {
    DEFAULT_MOUNT_PATH.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            token: SecretString::default(),
            namespace: String::new(),
            mount_path: default_mount_path(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            tls_verify: false,
            use_env_secrets: false,
            allow_unauthenticated: false,
        }
    }
}

impl ClientConfig {
    /// Load the configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `VAULT_ADDR`: store address (default: "http://localhost:8200")
    /// - `VAULT_TOKEN`: authentication token (default: empty)
    /// - `VAULT_NAMESPACE`: namespace (default: none)
    /// - `VAULT_MOUNT_PATH`: KV v2 mount path (default: "secret")
    /// - `VAULT_TIMEOUT`: timeout in seconds (default: 30)
    /// - `VAULT_VERIFY_SSL`: "true" to verify TLS (default: false)
    /// - `USE_ENV_SECRETS`: "true" to skip the store entirely (default: false)
    /// - `VAULT_ALLOW_UNAUTHENTICATED`: "true" to allow an empty token (default: false)
    ///
    /// # Errors
    ///
    /// - [`SecretsError::Config`] if `VAULT_TIMEOUT` is not a whole number of seconds
    pub fn from_env() -> Result<Self> {
        Self::from_env_source(&ProcessEnv)
    }

    /// Load the configuration from an explicit set of environment variables.
    pub fn from_env_source(env: &dyn EnvSource) -> Result<Self> {
        let timeout_seconds = match env.non_empty(VAULT_TIMEOUT) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                SecretsError::config_error(format!("Invalid {} '{}': {}", VAULT_TIMEOUT, raw, e))
            })?,
            None => DEFAULT_TIMEOUT_SECONDS,
        };

        Ok(Self {
            address: env.get_or(VAULT_ADDR, DEFAULT_ADDRESS),
            token: SecretString::new(env.get_or(VAULT_TOKEN, "")),
            namespace: env.get_or(VAULT_NAMESPACE, ""),
            mount_path: env.get_or(VAULT_MOUNT_PATH, DEFAULT_MOUNT_PATH),
            timeout_seconds,
            tls_verify: env.flag(VAULT_VERIFY_SSL),
            use_env_secrets: env.flag(USE_ENV_SECRETS),
            allow_unauthenticated: env.flag(VAULT_ALLOW_UNAUTHENTICATED),
        })
    }

    /// Check the settings needed to talk to the store.
    ///
    /// A missing token is rejected unless `allow_unauthenticated` is set.
    /// Running against the store without a credential is never implicit.
    pub fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(SecretsError::config_error("Vault address cannot be empty"));
        }

        url::Url::parse(&self.address).map_err(|e| {
            SecretsError::config_error(format!("Invalid Vault address '{}': {}", self.address, e))
        })?;

        if self.mount_path.trim().is_empty() {
            return Err(SecretsError::config_error("Vault mount path cannot be empty"));
        }

        if self.token.is_empty() && !self.allow_unauthenticated {
            return Err(SecretsError::config_error(format!(
                "Vault token is required: set {} (or {}=true for local development)",
                VAULT_TOKEN, VAULT_ALLOW_UNAUTHENTICATED
            )));
        }

        Ok(())
    }

    /// Transport timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Namespace, `None` when empty.
    pub fn namespace(&self) -> Option<&str> {
        Some(self.namespace.as_str()).filter(|ns| !ns.is_empty())
    }
}
