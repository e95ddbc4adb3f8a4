//! Ordered secret map
//!
//! Keys keep the order in which they were first inserted. Re-inserting an
//! existing key replaces the value in place, so the last write wins on the
//! value while the first occurrence keeps its position. This applies both to
//! duplicate keys in the JSON document and to keys that collide after a
//! rename.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;

use crate::{CoreError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretMap {
    entries: Vec<(String, String)>,
}

impl SecretMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of secret name to value.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| CoreError::MalformedSecretsInput(e.to_string()))
    }

    /// Insert or overwrite. Returns the previous value for `key`, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Comma-joined key list, used in log lines.
    pub fn key_summary(&self) -> String {
        self.keys().collect::<Vec<_>>().join(", ")
    }

    /// New map holding the entries whose key satisfies `keep`.
    pub fn filter_keys(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        self.entries
            .iter()
            .filter(|(k, _)| keep(k.as_str()))
            .cloned()
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for SecretMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = SecretMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl IntoIterator for SecretMap {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Render a JSON value the way it should appear in the env file.
fn value_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

struct SecretMapVisitor;

impl<'de> Visitor<'de> for SecretMapVisitor {
    type Value = SecretMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object of secret names to values")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = SecretMap::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.insert(key, value_text(value));
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for SecretMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SecretMapVisitor)
    }
}
