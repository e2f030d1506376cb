//! Minion config loading, mutation and persistence.

use super::model::{DEFAULT_MASTER_KEY, LEGACY_MASTER_KEY, MinionConfig};
use crate::error::{OrcaError, Result};
use crate::fs::atomic_write;
use log::debug;
use serde_yaml::{Mapping, Value};
use std::path::Path;

impl MinionConfig {
    /// Load the minion config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(MinionConfig)` - Successfully decoded config
    /// * `Err(OrcaError::Read)` - The file could not be read
    /// * `Err(OrcaError::Decode)` - The file is not a YAML mapping with a usable master entry
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|e| OrcaError::Read(format!("'{}': {}", path.display(), e)))?;

        let config = Self::from_yaml(&content).map_err(|e| match e {
            OrcaError::Decode(msg) => {
                OrcaError::Decode(format!("'{}': {}", path.display(), msg))
            }
            other => other,
        })?;

        debug!(
            "loaded {} with {} master(s) under '{}'",
            path.display(),
            config.masters.len(),
            config.master_key
        );
        Ok(config)
    }

    /// Parse a minion config from a YAML string.
    ///
    /// An empty (or all-comment) document is an empty config. The master
    /// entry may be absent, null, a single string, or a list of strings;
    /// numeric entries such as `0x0A` must be quoted.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let value: Value = if has_content(yaml) {
            serde_yaml::from_str(yaml).map_err(|e| OrcaError::Decode(e.to_string()))?
        } else {
            Value::Null
        };

        let mut document = match value {
            Value::Null => Mapping::new(),
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(OrcaError::Decode(format!(
                    "expected a mapping at the top level, found {}",
                    describe(&other)
                )));
            }
        };

        let master_key = if document.contains_key(DEFAULT_MASTER_KEY) {
            DEFAULT_MASTER_KEY
        } else if document.contains_key(LEGACY_MASTER_KEY) {
            LEGACY_MASTER_KEY
        } else {
            DEFAULT_MASTER_KEY
        };

        let slot = document
            .entry(Value::from(master_key))
            .or_insert(Value::Null);
        let masters = decode_masters(master_key, slot)?;
        *slot = Value::Null;

        Ok(Self {
            masters,
            master_key: master_key.to_string(),
            document,
        })
    }

    /// Put `address` in front of the master list.
    ///
    /// The address is not validated and the list is not deduplicated:
    /// adding the same address twice yields two leading entries.
    pub fn add_master(&mut self, address: impl Into<String>) {
        self.masters.insert(0, address.into());
    }

    /// Serialize the config to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        let mut document = self.document.clone();
        let masters = self.masters.iter().cloned().map(Value::from).collect();
        document.insert(
            Value::from(self.master_key.as_str()),
            Value::Sequence(masters),
        );

        serde_yaml::to_string(&Value::Mapping(document))
            .map_err(|e| OrcaError::Encode(e.to_string()))
    }

    /// Serialize the config to the bytes that go on disk.
    pub fn dump(&self) -> Result<Vec<u8>> {
        self.to_yaml().map(String::into_bytes)
    }
}

/// Overwrite the config file at `path` with `bytes`, mode `0644`.
pub fn save<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    atomic_write(path, bytes)?;
    debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Whether the document has anything besides blank lines, comments and markers.
fn has_content(yaml: &str) -> bool {
    yaml.lines().any(|line| {
        let line = line.trim();
        !(line.is_empty() || line.starts_with('#') || line == "---" || line == "...")
    })
}

fn decode_masters(key: &str, value: &Value) -> Result<Vec<String>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                scalar_to_string(item).ok_or_else(|| {
                    OrcaError::Decode(format!(
                        "'{}' entry {} must be an address string, found {}",
                        key,
                        i,
                        describe(item)
                    ))
                })
            })
            .collect(),
        scalar => scalar_to_string(scalar).map(|s| vec![s]).ok_or_else(|| {
            OrcaError::Decode(format!(
                "'{}' must be an address or a list of addresses, found {}",
                key,
                describe(scalar)
            ))
        }),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        // Numbers would be written back re-rendered, not as the file spelled them.
        _ => None,
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
