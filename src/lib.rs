//! # GradeLoop Secrets
//!
//! Typed configuration resolution for GradeLoop services. Database, cache and
//! token-signing settings come either from environment variables or from a
//! HashiCorp Vault KV v2 store, chosen per domain at resolution time.
//!
//! ## Architecture
//!
//! ```text
//! SecretsClient ──► Resolver ──► EnvSource (process env / map)
//!                       │
//!                       └──────► SecretStore (VaultStore, KV v2)
//! ```
//!
//! ## Core Components
//!
//! - **Client facade** ([`SecretsClient`]): one entry point configured by [`ClientConfig`]
//! - **Resolution policy** ([`secrets::Resolver`]): per domain, the presence of a
//!   single environment variable selects environment mode; otherwise the store
//!   path is read once and merged with defaults
//! - **Typed records** ([`DatabaseConfig`], [`CacheConfig`], [`TokenConfig`]):
//!   secrets held in [`SecretString`], connection URLs rendered on demand
//! - **Observability** ([`observability`]): redacting JSON logs with trace IDs
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gradeloop_secrets::SecretsClient;
//!
//! # async fn run() -> Result<(), gradeloop_secrets::SecretsError> {
//! let client = SecretsClient::from_env().await?;
//! let db = client.resolve_database_config().await?;
//! println!("connecting to {}:{}", db.host, db.port);
//! client.close()?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod secrets;

// Re-export commonly used types and traits
pub use client::SecretsClient;
pub use config::{CacheConfig, ClientConfig, DatabaseConfig, ServiceConfig, TokenConfig};
pub use errors::{Error, Result};
pub use secrets::{
    EnvSource, MapEnv, ProcessEnv, SecretMap, SecretStore, SecretString, SecretsError, VaultStore,
};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
