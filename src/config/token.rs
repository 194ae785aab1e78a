//! # Token Signing Configuration

use serde::Serialize;

use crate::secrets::resolver::{Domain, Field, ResolvableConfig, ResolvedFields};
use crate::secrets::types::SecretString;

pub const JWT_ACCESS_SECRET: &str = "JWT_ACCESS_SECRET";
pub const JWT_ALGORITHM: &str = "JWT_ALGORITHM";
pub const JWT_ACCESS_EXPIRY: &str = "JWT_ACCESS_EXPIRY";
pub const JWT_REFRESH_EXPIRY: &str = "JWT_REFRESH_EXPIRY";

/// Secret-store path holding the JWT signing material.
pub const TOKEN_SECRET_PATH: &str = "auth/jwt";

/// JWT signing settings. Expiries are kept as the duration strings the
/// issuing service understands (e.g. "15m", "30d").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenConfig {
    pub secret: SecretString,
    pub algorithm: String,
    pub expiry: String,
    pub refresh_expiry: String,
}

impl ResolvableConfig for TokenConfig {
    const DOMAIN: Domain = Domain {
        name: "token",
        presence_var: JWT_ACCESS_SECRET,
        path: TOKEN_SECRET_PATH,
        fields: &[
            Field { env: JWT_ACCESS_SECRET, key: "secret", default: "" },
            Field { env: JWT_ALGORITHM, key: "algorithm", default: "HS256" },
            Field { env: JWT_ACCESS_EXPIRY, key: "expiry", default: "15m" },
            Field { env: JWT_REFRESH_EXPIRY, key: "refresh_expiry", default: "30d" },
        ],
    };

    fn from_fields(mut fields: ResolvedFields) -> Self {
        Self {
            secret: SecretString::new(fields.take("secret")),
            algorithm: fields.take("algorithm"),
            expiry: fields.take("expiry"),
            refresh_expiry: fields.take("refresh_expiry"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_redacts_secret() {
        let config = TokenConfig {
            secret: SecretString::new("signing-key"),
            algorithm: "HS256".to_string(),
            expiry: "15m".to_string(),
            refresh_expiry: "30d".to_string(),
        };

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"algorithm\":\"HS256\""));
        assert!(!json.contains("signing-key"));
        assert!(!format!("{:?}", config).contains("signing-key"));
    }
}
