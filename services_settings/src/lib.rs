#![no_std]

//! # Settings Registry Service
//!
//! A typed settings system for the calculator host.
//!
//! ## Philosophy
//!
//! - **Typed settings**: All settings have explicit types, not stringly-typed
//! - **Layered**: Read-only defaults + overrides
//! - **Closed**: Only keys that have a default can be overridden, and only with
//!   a value of the same type
//! - **Deterministic**: Settings are serializable and reproducible
//!
//! ## Example
//!
//! ```ignore
//! use services_settings::{create_default_registry, keys, SettingValue};
//!
//! let mut registry = create_default_registry();
//! registry.set_override(keys::DISPLAY_SIGN_POSITION, SettingValue::String("trailing".into()))?;
//! let position = registry.get_string(keys::DISPLAY_SIGN_POSITION);
//! ```

pub mod persistence;

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Setting key (path-like identifier)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SettingKey(String);

impl SettingKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks if this key starts with the given prefix
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SettingKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Setting value (strongly typed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettingValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl SettingValue {
    /// Name of the variant, used in type mismatch reports
    pub fn type_name(&self) -> &'static str {
        match self {
            SettingValue::Boolean(_) => "Boolean",
            SettingValue::Integer(_) => "Integer",
            SettingValue::Float(_) => "Float",
            SettingValue::String(_) => "String",
        }
    }

    pub fn same_type(&self, other: &SettingValue) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            SettingValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            SettingValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            SettingValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Boolean(v) => write!(f, "{}", v),
            SettingValue::Integer(v) => write!(f, "{}", v),
            SettingValue::Float(v) => write!(f, "{}", v),
            SettingValue::String(v) => write!(f, "{}", v),
        }
    }
}

/// Errors from changing settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The key has no registered default
    UnknownKey(String),
    /// The value's type differs from the default's type
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::UnknownKey(key) => write!(f, "Unknown setting: {}", key),
            SettingsError::TypeMismatch {
                key,
                expected,
                found,
            } => write!(
                f,
                "Setting {} expects a {} value, got {}",
                key, expected, found
            ),
        }
    }
}

/// Settings registry
#[derive(Debug, Clone, Default)]
pub struct SettingsRegistry {
    /// Default settings (read-only)
    defaults: BTreeMap<SettingKey, SettingValue>,
    /// Overrides, always of the default's type
    overrides: BTreeMap<SettingKey, SettingValue>,
}

impl SettingsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a default setting
    pub fn register_default(&mut self, key: impl Into<SettingKey>, value: SettingValue) {
        self.defaults.insert(key.into(), value);
    }

    /// Sets an override after checking it against the default
    pub fn set_override(
        &mut self,
        key: impl Into<SettingKey>,
        value: SettingValue,
    ) -> Result<(), SettingsError> {
        let key = key.into();
        self.check(&key, &value)?;
        self.overrides.insert(key, value);
        Ok(())
    }

    /// Removes an override, returning whether one was set
    pub fn remove_override(&mut self, key: &SettingKey) -> bool {
        self.overrides.remove(key).is_some()
    }

    /// Gets the effective setting value (override or default)
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        let key = SettingKey::from(key);
        self.overrides.get(&key).or_else(|| self.defaults.get(&key))
    }

    pub fn get_default(&self, key: &str) -> Option<&SettingValue> {
        self.defaults.get(&SettingKey::from(key))
    }

    pub fn get_override(&self, key: &str) -> Option<&SettingValue> {
        self.overrides.get(&SettingKey::from(key))
    }

    pub fn get_boolean(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(SettingValue::as_boolean)
    }

    pub fn get_integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(SettingValue::as_integer)
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(SettingValue::as_string)
    }

    /// Returns all default setting keys
    pub fn list_defaults(&self) -> Vec<SettingKey> {
        self.defaults.keys().cloned().collect()
    }

    /// Returns all overridden keys
    pub fn list_overrides(&self) -> Vec<SettingKey> {
        self.overrides.keys().cloned().collect()
    }

    /// Returns the effective settings under a prefix, in key order
    pub fn list_with_prefix(&self, prefix: &str) -> Vec<(SettingKey, SettingValue)> {
        self.defaults
            .keys()
            .filter(|key| key.starts_with(prefix))
            .filter_map(|key| {
                self.get(key.as_str())
                    .map(|value| (key.clone(), value.clone()))
            })
            .collect()
    }

    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
    }

    /// Exports all overrides for persistence
    pub fn export_overrides(&self) -> BTreeMap<SettingKey, SettingValue> {
        self.overrides.clone()
    }

    /// Merges overrides into the registry.
    ///
    /// Every entry is checked first; on error nothing is applied.
    pub fn import_overrides(
        &mut self,
        overrides: BTreeMap<SettingKey, SettingValue>,
    ) -> Result<(), SettingsError> {
        for (key, value) in &overrides {
            self.check(key, value)?;
        }
        self.overrides.extend(overrides);
        Ok(())
    }

    fn check(&self, key: &SettingKey, value: &SettingValue) -> Result<(), SettingsError> {
        let default = self
            .defaults
            .get(key)
            .ok_or_else(|| SettingsError::UnknownKey(key.as_str().to_string()))?;
        if !default.same_type(value) {
            return Err(SettingsError::TypeMismatch {
                key: key.as_str().to_string(),
                expected: default.type_name(),
                found: value.type_name(),
            });
        }
        Ok(())
    }
}

/// Calculator setting keys
pub mod keys {
    /// `"leading"` (`-12`) or `"trailing"` (`12-`)
    pub const DISPLAY_SIGN_POSITION: &str = "display.sign_position";
    /// Show `display.error_text` instead of inf/NaN
    pub const DISPLAY_ERROR_ON_NON_FINITE: &str = "display.error_on_non_finite";
    pub const DISPLAY_ERROR_TEXT: &str = "display.error_text";
    /// Minimum level kept by the session log
    pub const LOG_LEVEL: &str = "log.level";
    /// Number of log entries kept
    pub const LOG_CAPACITY: &str = "log.capacity";
}

/// Creates a settings registry with default settings
pub fn create_default_registry() -> SettingsRegistry {
    let mut registry = SettingsRegistry::new();

    registry.register_default(
        keys::DISPLAY_SIGN_POSITION,
        SettingValue::String("leading".to_string()),
    );
    registry.register_default(keys::DISPLAY_ERROR_ON_NON_FINITE, SettingValue::Boolean(false));
    registry.register_default(
        keys::DISPLAY_ERROR_TEXT,
        SettingValue::String("Error".to_string()),
    );

    registry.register_default(keys::LOG_LEVEL, SettingValue::String("info".to_string()));
    registry.register_default(keys::LOG_CAPACITY, SettingValue::Integer(256));

    registry
}
