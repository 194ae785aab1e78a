//! # Example Service Configuration

use crate::errors::{Error, Result};
use crate::secrets::env::{EnvSource, ProcessEnv};

/// Settings for the bundled example HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind_address: String,
    pub port: u16,
    /// Name used in log records and for the `services/{name}` secret map
    pub service_name: String,
    /// Default log level when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            service_name: "assignment".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_env_source(&ProcessEnv)
    }

    pub fn from_env_source(env: &dyn EnvSource) -> Result<Self> {
        let defaults = Self::default();

        let port = match env.non_empty("PORT") {
            Some(raw) => {
                raw.parse().map_err(|e| Error::config(format!("Invalid PORT '{}': {}", raw, e)))?
            }
            None => defaults.port,
        };

        Ok(Self {
            bind_address: env.get_or("HOST", &defaults.bind_address),
            port,
            service_name: env.get_or("SERVICE_NAME", &defaults.service_name),
            log_level: env.get_or("LOG_LEVEL", &defaults.log_level),
        })
    }

    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
