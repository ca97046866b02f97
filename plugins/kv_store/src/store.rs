//! The in-memory key/value store

use crate::cast::format_float;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A flat mapping from key to value, parsed from one text block or one registry file.
///
/// Values parsed from `key=value` text are always strings. Values parsed from
/// JSON keep whatever type the JSON document had and are coerced to a string
/// by [`value_to_string`] before they reach a consumer. Insertion order is
/// kept so that writing a store back preserves the original layout.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Store(Map<String, Value>);

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Insert a value, replacing any previous value for `key`
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get the raw value stored under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get the value stored under `key` in its string form
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.0.get(key).map(value_to_string)
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

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// All keys, sorted lexicographically
    pub fn sorted_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.0.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Newline-joined sorted key list, as shown by the key dropdown
    pub fn key_listing(&self) -> String {
        self.sorted_keys().join("\n")
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Store {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Store {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut store = Store::new();
        for (key, value) in iter {
            store.insert(key, value);
        }
        store
    }
}

/// Coerce a stored value to the string handed to consumers.
///
/// Strings are returned as-is and `null` becomes the empty string. Floating
/// point numbers are written the way a `float` cast writes them, and every
/// other value uses its compact JSON text.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) if n.is_f64() => n
            .as_f64()
            .map(format_float)
            .unwrap_or_else(|| n.to_string()),
        other => other.to_string(),
    }
}
