//! Secret resolution.
//!
//! This module decides, per configuration domain, whether values come from the
//! process environment or from a remote secret store, and reads the store.
//!
//! # Architecture
//!
//! - [`SecretStore`]: backend-agnostic accessor (`read_secret_map`,
//!   `read_secret_value`)
//! - [`VaultStore`]: HashiCorp Vault KV v2 implementation
//! - [`EnvSource`]: read-only view of environment variables
//! - [`Resolver`]: the env-or-store policy with per-field defaults
//!
//! # Security Considerations
//!
//! - Secret values are never logged; log fields carry paths and key counts only
//! - Passwords, tokens and signing keys are held in [`SecretString`]
//! - [`SecretMap`]'s `Debug` prints keys, never values

pub mod env;
pub mod error;
pub mod map;
pub mod resolver;
pub mod store;
pub mod types;
pub mod vault;

pub use env::{EnvSource, MapEnv, ProcessEnv};
pub use error::{Result, SecretsError};
pub use map::SecretMap;
pub use resolver::{ConfigSource, Resolver};
pub use store::SecretStore;
pub use types::SecretString;
pub use vault::VaultStore;
