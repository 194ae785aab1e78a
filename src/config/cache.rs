//! # Cache Configuration
//!
//! Redis connection settings.

use serde::Serialize;

use crate::secrets::resolver::{Domain, Field, ResolvableConfig, ResolvedFields};
use crate::secrets::types::SecretString;

pub const REDIS_HOST: &str = "REDIS_HOST";
pub const REDIS_PORT: &str = "REDIS_PORT";
pub const REDIS_PASSWORD: &str = "REDIS_PASSWORD";
pub const REDIS_DB: &str = "REDIS_DB";

/// Secret-store path holding the cache credentials.
pub const CACHE_SECRET_PATH: &str = "cache/redis";

/// Redis connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheConfig {
    pub host: String,
    pub port: String,
    pub password: SecretString,
    /// Database index (default: "0")
    pub db: String,
}

impl CacheConfig {
    /// `redis://` URL, with a `:password@` segment only when a password is set.
    ///
    /// Unlike [`DatabaseConfig::url`](super::DatabaseConfig::url), the password
    /// is inserted without percent-encoding. A password containing `@` or `/`
    /// yields a URL that Redis clients may split incorrectly; callers with such
    /// passwords should build the connection from the individual fields.
    pub fn url(&self) -> String {
        if self.password.is_empty() {
            format!("redis://{}:{}/{}", self.host, self.port, self.db)
        } else {
            format!(
                "redis://:{}@{}:{}/{}",
                self.password.expose_secret(),
                self.host,
                self.port,
                self.db
            )
        }
    }

    /// `host:port` address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ResolvableConfig for CacheConfig {
    const DOMAIN: Domain = Domain {
        name: "cache",
        presence_var: REDIS_HOST,
        path: CACHE_SECRET_PATH,
        fields: &[
            Field { env: REDIS_HOST, key: "host", default: "localhost" },
            Field { env: REDIS_PORT, key: "port", default: "6379" },
            Field { env: REDIS_PASSWORD, key: "password", default: "" },
            Field { env: REDIS_DB, key: "db", default: "0" },
        ],
    };

    fn from_fields(mut fields: ResolvedFields) -> Self {
        Self {
            host: fields.take("host"),
            port: fields.take("port"),
            password: SecretString::new(fields.take("password")),
            db: fields.take("db"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample(password: &str) -> CacheConfig {
        CacheConfig {
            host: "redis.example.com".to_string(),
            port: "6380".to_string(),
            password: SecretString::new(password),
            db: "1".to_string(),
        }
    }

    #[test]
    fn test_url_without_password() {
        assert_eq!(sample("").url(), "redis://redis.example.com:6380/1");
    }

    #[test]
    fn test_url_with_password() {
        assert_eq!(sample("redis_pass").url(), "redis://:redis_pass@redis.example.com:6380/1");
    }

    #[test]
    fn test_url_does_not_encode_password() {
        // Reserved characters pass through untouched.
        assert_eq!(sample("p@ss/rd").url(), "redis://:p@ss/rd@redis.example.com:6380/1");
    }

    #[test]
    fn test_address() {
        assert_eq!(sample("").address(), "redis.example.com:6380");
    }

    proptest! {
        #[test]
        fn prop_credential_segment_iff_password(password in "[A-Za-z0-9!$%^&*()_+=-]{0,24}") {
            let url = sample(&password).url();
            if password.is_empty() {
                prop_assert!(!url.contains('@'));
            } else {
                let segment = format!(":{}@", password);
                prop_assert_eq!(url.matches(segment.as_str()).count(), 1);
            }
        }
    }
}
