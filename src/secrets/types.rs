//! Secure types for handling sensitive data.
//!
//! Credentials resolved from the environment or the secret store are carried in
//! [`SecretString`] so they cannot leak through `Debug`, `Display` or
//! serialization into logs or API responses.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string wrapper that redacts its contents in Debug, Display, and serialization.
///
/// - Debug output shows `SecretString([REDACTED])`
/// - Display output shows `[REDACTED]`
/// - Serialization outputs `"[REDACTED]"`
/// - Deserialization accepts the actual value
/// - Memory is zeroed on drop
///
/// The raw value is only reachable through [`SecretString::expose_secret`].
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str("[REDACTED]")
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(SecretString(value))
    }
}

impl SecretString {
    /// Creates a new SecretString from a string value.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Exposes the underlying secret value.
    ///
    /// Only call this where the raw value is consumed (connection strings,
    /// request headers). Never log the result.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Returns true if the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecretString {}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Default for SecretString {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_string_redacts_debug_and_display() {
        let secret = SecretString::new("p@ss/rd");

        assert_eq!(format!("{:?}", secret), "SecretString([REDACTED])");
        assert_eq!(format!("{}", secret), "[REDACTED]");
    }

    #[test]
    fn test_secret_string_expose() {
        let secret = SecretString::new("hvs.token");
        assert_eq!(secret.expose_secret(), "hvs.token");
        assert!(!secret.is_empty());
        assert!(SecretString::default().is_empty());
    }

    #[test]
    fn test_secret_string_serialization_redacts() {
        #[derive(Serialize)]
        struct Payload {
            user: String,
            password: SecretString,
        }

        let json = serde_json::to_string(&Payload {
            user: "grader".to_string(),
            password: SecretString::new("hidden-password"),
        })
        .unwrap();

        assert!(json.contains("grader"));
        assert!(json.contains("[REDACTED]"));
        assert!(!json.contains("hidden-password"));
    }

    #[test]
    fn test_secret_string_deserialization_accepts_values() {
        let secret: SecretString = serde_json::from_str("\"from-vault\"").unwrap();
        assert_eq!(secret.expose_secret(), "from-vault");
    }
}
