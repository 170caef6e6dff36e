//! Display rendering

use crate::calculator::{CalculatorError, CalculatorResult};
use services_settings::{keys, SettingsRegistry};

/// Where the minus sign of a negative value goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignPosition {
    /// `-12`
    #[default]
    Leading,
    /// `12-`, as on right-to-left pocket calculator displays
    Trailing,
}

impl SignPosition {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "leading" => Some(SignPosition::Leading),
            "trailing" => Some(SignPosition::Trailing),
            _ => None,
        }
    }
}

/// Presentation options read from settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub sign_position: SignPosition,
    /// Render infinities and NaN as `error_text`
    pub error_on_non_finite: bool,
    pub error_text: String,
}

impl DisplayOptions {
    /// Reads the `display.*` settings
    pub fn from_settings(settings: &SettingsRegistry) -> CalculatorResult<Self> {
        let defaults = Self::default();

        let sign_position = match settings.get_string(keys::DISPLAY_SIGN_POSITION) {
            Some(name) => SignPosition::parse(name).ok_or_else(|| {
                CalculatorError::Settings(format!(
                    "{} must be \"leading\" or \"trailing\", got {:?}",
                    keys::DISPLAY_SIGN_POSITION,
                    name
                ))
            })?,
            None => defaults.sign_position,
        };

        Ok(Self {
            sign_position,
            error_on_non_finite: settings
                .get_boolean(keys::DISPLAY_ERROR_ON_NON_FINITE)
                .unwrap_or(defaults.error_on_non_finite),
            error_text: settings
                .get_string(keys::DISPLAY_ERROR_TEXT)
                .map(str::to_string)
                .unwrap_or(defaults.error_text),
        })
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            sign_position: SignPosition::Leading,
            error_on_non_finite: false,
            error_text: "Error".to_string(),
        }
    }
}

/// Formats display values as text
#[derive(Debug, Clone, Default)]
pub struct DisplayView {
    options: DisplayOptions,
}

impl DisplayView {
    pub fn new(options: DisplayOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    /// Render a display value.
    ///
    /// Finite values use the shortest decimal form that reads back to the
    /// same f64; negative zero shows as `0`.
    pub fn render(&self, value: f64) -> String {
        if !value.is_finite() && self.options.error_on_non_finite {
            return self.options.error_text.clone();
        }
        if value.is_nan() {
            return "NaN".to_string();
        }

        let magnitude = if value.is_infinite() {
            "inf".to_string()
        } else {
            value.abs().to_string()
        };

        if value < 0.0 {
            match self.options.sign_position {
                SignPosition::Leading => format!("-{}", magnitude),
                SignPosition::Trailing => format!("{}-", magnitude),
            }
        } else {
            magnitude
        }
    }
}
