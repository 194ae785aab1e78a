//! The raw key/value result of one secret-store path lookup.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Flat secret map read from a single store path.
///
/// Values are whatever JSON the store holds. When a field is read as a string,
/// scalars (strings, numbers, booleans) are rendered to text and everything
/// else (`null`, arrays, objects) is treated as absent.
///
/// `Debug` lists keys only; values are never printed.
#[derive(Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SecretMap(HashMap<String, Value>);

impl SecretMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Scalar value for `key` rendered as a string.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Scalar value for `key`, or `default` when absent or not a scalar.
    pub fn string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|| default.to_string())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys present in the map, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_inner(self) -> HashMap<String, Value> {
        self.0
    }
}

impl From<HashMap<String, Value>> for SecretMap {
    fn from(map: HashMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for SecretMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl fmt::Debug for SecretMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("SecretMap").field("keys", &keys).finish()
    }
}
