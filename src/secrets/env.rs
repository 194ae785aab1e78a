//! Environment variable access.
//!
//! Resolution reads the environment through an [`EnvSource`] handle instead of
//! calling `std::env` directly, so the presence checks and per-field defaults
//! can be driven from a fixed map in tests.
//!
//! An empty value is treated the same as an unset variable everywhere in this
//! crate: `POSTGRES_HOST=""` does not select environment resolution, and
//! `POSTGRES_PORT=""` falls back to the default port.

use std::collections::HashMap;

/// Read-only view of a set of environment variables.
pub trait EnvSource: Send + Sync {
    /// Raw value of `name`, `None` when unset.
    fn var(&self, name: &str) -> Option<String>;

    /// Value of `name` when set to a non-empty string.
    fn non_empty(&self, name: &str) -> Option<String> {
        self.var(name).filter(|value| !value.is_empty())
    }

    /// Value of `name`, or `default` when unset or empty.
    fn get_or(&self, name: &str, default: &str) -> String {
        self.non_empty(name).unwrap_or_else(|| default.to_string())
    }

    /// Whether `name` is set to a non-empty value.
    fn is_present(&self, name: &str) -> bool {
        self.non_empty(name).is_some()
    }

    /// Boolean flag: `"true"` (any case) is true, anything else is false.
    fn flag(&self, name: &str) -> bool {
        self.non_empty(name).map(|value| value.eq_ignore_ascii_case("true")).unwrap_or(false)
    }
}

/// The current process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed set of variables, detached from the process environment.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Creates an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a variable.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
