//! Resolution policy: environment variables or secret store, per domain.
//!
//! Every typed configuration domain is described by a static [`Domain`] table
//! (presence variable, store path, and `(env var, map key, default)` per field).
//! Resolution is the same for all of them:
//!
//! 1. If the domain's presence variable is set (non-empty), every field comes
//!    from its environment variable, falling back to the field default.
//!    The store is not contacted.
//! 2. Otherwise the store is read exactly once at the domain's path and every
//!    field comes from the returned map, falling back to the same defaults.
//!
//! Without a store (environment-only mode) step 1 is always taken.
//!
//! Named service maps (`services/{name}`) skip the table entirely: they are a
//! single store read returned as-is.

use std::collections::HashMap;
use std::fmt;

use super::env::EnvSource;
use super::error::{Result, SecretsError};
use super::map::SecretMap;
use super::store::SecretStore;
use crate::config::{CacheConfig, DatabaseConfig, TokenConfig};

/// Store path prefix for per-service secret maps.
pub const SERVICE_SECRET_PREFIX: &str = "services";

/// One field of a typed configuration.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Environment variable consulted in environment mode
    pub env: &'static str,
    /// Key read from the secret map in store mode
    pub key: &'static str,
    /// Value used when the variable or key is absent
    pub default: &'static str,
}

/// Resolution table for one configuration domain.
#[derive(Debug, Clone, Copy)]
pub struct Domain {
    pub name: &'static str,
    /// Environment variable whose presence selects environment resolution
    pub presence_var: &'static str,
    /// Store path read in store mode
    pub path: &'static str,
    pub fields: &'static [Field],
}

/// Where a typed configuration was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Environment,
    SecretStore,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Environment => write!(f, "environment"),
            ConfigSource::SecretStore => write!(f, "secret_store"),
        }
    }
}

/// Fully defaulted field values for one domain, keyed by map key.
#[derive(Debug)]
pub struct ResolvedFields {
    values: HashMap<&'static str, String>,
    source: ConfigSource,
}

impl ResolvedFields {
    fn from_env(domain: &Domain, env: &dyn EnvSource) -> Self {
        let values =
            domain.fields.iter().map(|f| (f.key, env.get_or(f.env, f.default))).collect();
        Self { values, source: ConfigSource::Environment }
    }

    fn from_map(domain: &Domain, secrets: &SecretMap) -> Self {
        let values =
            domain.fields.iter().map(|f| (f.key, secrets.string_or(f.key, f.default))).collect();
        Self { values, source: ConfigSource::SecretStore }
    }

    /// Remove and return the value for `key`.
    ///
    /// Every key in the domain table is populated, so this only yields an
    /// empty string for keys the table does not list.
    pub fn take(&mut self, key: &str) -> String {
        self.values.remove(key).unwrap_or_default()
    }

    pub fn source(&self) -> ConfigSource {
        self.source
    }
}

/// A configuration type assembled from a [`Domain`] table.
pub trait ResolvableConfig: Sized {
    const DOMAIN: Domain;

    fn from_fields(fields: ResolvedFields) -> Self;
}

/// Applies the resolution policy against an environment and an optional store.
///
/// Borrowed views only; a resolver is created per call and holds no state.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    env: &'a dyn EnvSource,
    store: Option<&'a dyn SecretStore>,
}

impl<'a> Resolver<'a> {
    pub fn new(env: &'a dyn EnvSource, store: Option<&'a dyn SecretStore>) -> Self {
        Self { env, store }
    }

    /// Resolve any table-driven configuration type.
    pub async fn resolve<C: ResolvableConfig>(&self) -> Result<C> {
        let domain = C::DOMAIN;

        let fields = match self.store {
            Some(store) if !self.env.is_present(domain.presence_var) => {
                let secrets = store.read_secret_map(domain.path).await?;
                ResolvedFields::from_map(&domain, &secrets)
            }
            _ => ResolvedFields::from_env(&domain, self.env),
        };

        tracing::debug!(
            domain = domain.name,
            source = %fields.source(),
            path = domain.path,
            "Resolved configuration"
        );

        Ok(C::from_fields(fields))
    }

    pub async fn resolve_database_config(&self) -> Result<DatabaseConfig> {
        self.resolve().await
    }

    pub async fn resolve_cache_config(&self) -> Result<CacheConfig> {
        self.resolve().await
    }

    pub async fn resolve_token_config(&self) -> Result<TokenConfig> {
        self.resolve().await
    }

    /// Read `services/{name}` from the store, without defaults.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::Config`] if no store is configured
    /// - [`SecretsError::LookupFailed`] if the read fails
    pub async fn resolve_named_secret_map(&self, name: &str) -> Result<SecretMap> {
        let store = self.store.ok_or_else(|| {
            SecretsError::config_error(format!(
                "No secret store configured; cannot read secrets for service '{}'",
                name
            ))
        })?;

        let path = format!("{}/{}", SERVICE_SECRET_PREFIX, name);
        store.read_secret_map(&path).await
    }
}
