//! Settings file format
//!
//! Overrides are stored as a versioned JSON document:
//!
//! ```text
//! { "version": 1, "overrides": { "log.level": { "String": "debug" } } }
//! ```
//!
//! Defaults are never written; they come from `create_default_registry`.

use crate::{SettingKey, SettingValue, SettingsError, SettingsRegistry};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

/// On-disk overrides document, keyed in sorted order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsOverridesData {
    pub version: u32,
    #[serde(default)]
    pub overrides: BTreeMap<String, SettingValue>,
}

impl SettingsOverridesData {
    pub const CURRENT_VERSION: u32 = 1;

    /// Empty document at the current version
    pub fn new() -> Self {
        SettingsOverridesData {
            version: Self::CURRENT_VERSION,
            overrides: BTreeMap::new(),
        }
    }

    pub fn from_overrides(overrides: &BTreeMap<SettingKey, SettingValue>) -> Self {
        SettingsOverridesData {
            overrides: overrides
                .iter()
                .map(|(key, value)| (key.as_str().to_string(), value.clone()))
                .collect(),
            ..Self::new()
        }
    }

    /// Captures the overrides currently set on `registry`
    pub fn from_registry(registry: &SettingsRegistry) -> Self {
        Self::from_overrides(&registry.export_overrides())
    }

    pub fn to_overrides(&self) -> BTreeMap<SettingKey, SettingValue> {
        self.overrides
            .iter()
            .map(|(key, value)| (SettingKey::new(key.as_str()), value.clone()))
            .collect()
    }

    /// Applies every override to `registry`, or none of them on error
    pub fn apply_to(&self, registry: &mut SettingsRegistry) -> Result<(), SettingsError> {
        registry.import_overrides(self.to_overrides())
    }
}

impl Default for SettingsOverridesData {
    fn default() -> Self {
        SettingsOverridesData::new()
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Reading or writing a settings document failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    SerializationFailed(String),
    /// Not JSON, or not shaped like a settings document
    DeserializationFailed(String),
    /// Written by a different format version
    UnsupportedVersion(u32),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::SerializationFailed(reason) => {
                write!(f, "cannot encode settings: {}", reason)
            }
            PersistenceError::DeserializationFailed(reason) => {
                write!(f, "malformed settings document: {}", reason)
            }
            PersistenceError::UnsupportedVersion(found) => write!(
                f,
                "settings version {} is not supported (expected {})",
                found,
                SettingsOverridesData::CURRENT_VERSION
            ),
        }
    }
}

/// Encodes a document as pretty-printed JSON
pub fn serialize_overrides(data: &SettingsOverridesData) -> PersistenceResult<Vec<u8>> {
    serde_json::to_vec_pretty(data).map_err(|e| PersistenceError::SerializationFailed(e.to_string()))
}

/// Decodes a document, rejecting other format versions
pub fn deserialize_overrides(bytes: &[u8]) -> PersistenceResult<SettingsOverridesData> {
    let data = serde_json::from_slice::<SettingsOverridesData>(bytes)
        .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))?;

    match data.version {
        SettingsOverridesData::CURRENT_VERSION => Ok(data),
        other => Err(PersistenceError::UnsupportedVersion(other)),
    }
}

/// Like `deserialize_overrides`, but any failure yields an empty document
pub fn load_overrides_safe(bytes: &[u8]) -> SettingsOverridesData {
    deserialize_overrides(bytes).unwrap_or_default()
}
