//! Configuration documents
//!
//! A parsed configuration file: top-level keys mapped to arbitrary YAML
//! values. The validator only ever looks at the key set.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::debug;

use crate::error::{Result, SchemaError};

/// Top-level key/value mapping of a configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    entries: BTreeMap<String, Value>,
}

impl ConfigDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document. An empty or `null` document has no keys.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        let value: Value = serde_yaml::from_str(content)?;
        Self::from_value(value)
    }

    /// Read and parse a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let document = Self::from_yaml_str(&content)?;
        debug!(
            path = %path.display(),
            keys = document.len(),
            "Loaded configuration document"
        );
        Ok(document)
    }

    /// Convert an already-parsed JSON value
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self> {
        Self::from_value(serde_yaml::to_value(value)?)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Mapping(mapping) => mapping
                .into_iter()
                .map(|(key, value)| match key {
                    Value::String(key) => Ok((key, value)),
                    other => Err(SchemaError::InvalidFormat(format!(
                        "top-level keys must be strings, found {:?}",
                        other
                    ))),
                })
                .collect::<Result<BTreeMap<_, _>>>()
                .map(|entries| Self { entries }),
            other => Err(SchemaError::InvalidFormat(format!(
                "expected a mapping at the top level, found {}",
                value_kind(&other)
            ))),
        }
    }

    /// Keys present in the document, whatever their value
    pub fn keys(&self) -> BTreeSet<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Set a key, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Serialize back to YAML
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.entries)?)
    }
}

impl FromIterator<(String, Value)> for ConfigDocument {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
