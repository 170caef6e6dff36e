//! Settings contract tests
//!
//! These tests define the stable setting keys, their defaults and the
//! overrides file format.

use services_settings::SettingValue;

// ===== Settings Format Version =====
#[allow(dead_code)]
const SETTINGS_FORMAT_VERSION: u32 = 1;

/// Canonical defaults (stable contract)
#[allow(dead_code)]
fn canonical_defaults() -> Vec<(&'static str, SettingValue)> {
    vec![
        ("display.error_on_non_finite", SettingValue::Boolean(false)),
        ("display.error_text", SettingValue::String("Error".to_string())),
        ("display.sign_position", SettingValue::String("leading".to_string())),
        ("log.capacity", SettingValue::Integer(256)),
        ("log.level", SettingValue::String("info".to_string())),
    ]
}
