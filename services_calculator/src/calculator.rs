//! Calculator session

use crate::keymap::key_for_event;
use crate::render::{DisplayOptions, DisplayView};
use calc_core::{CalculatorEngine, DisplayObserver, EngineSnapshot, Key};
use input_types::InputEvent;
use services_logger::{LogEntry, LogLevel, LogSink, MemoryLog, SessionId};
use services_settings::{keys, SettingsRegistry};
use thiserror::Error;

/// Calculator error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculatorError {
    #[error("No calculator key for character {0:?}")]
    UnmappedChar(char),

    #[error("Invalid digit: {0}")]
    InvalidDigit(u8),

    #[error("Invalid settings: {0}")]
    Settings(String),
}

impl From<calc_core::InvalidDigit> for CalculatorError {
    fn from(err: calc_core::InvalidDigit) -> Self {
        CalculatorError::InvalidDigit(err.0)
    }
}

/// Calculator result
pub type CalculatorResult<T> = Result<T, CalculatorError>;

/// What an input event did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalculatorAction {
    /// Not calculator input (release, chord, unbound key)
    Ignored,
    /// A key was applied; carries the display value afterwards
    Updated(f64),
}

/// A calculator session: engine, renderer and log
pub struct Calculator {
    engine: CalculatorEngine,
    view: DisplayView,
    session: SessionId,
    log: Box<dyn LogSink>,
}

impl Calculator {
    /// Create a calculator with default presentation and an in-memory log
    pub fn new() -> Self {
        Self {
            engine: CalculatorEngine::new(),
            view: DisplayView::default(),
            session: SessionId::new(),
            log: Box::new(MemoryLog::default()),
        }
    }

    /// Create a calculator configured from `display.*` and `log.*` settings
    pub fn with_settings(settings: &SettingsRegistry) -> CalculatorResult<Self> {
        let options = DisplayOptions::from_settings(settings)?;

        let level = match settings.get_string(keys::LOG_LEVEL) {
            Some(name) => LogLevel::parse(name).ok_or_else(|| {
                CalculatorError::Settings(format!("{} has unknown level {:?}", keys::LOG_LEVEL, name))
            })?,
            None => LogLevel::Info,
        };
        let capacity = match settings.get_integer(keys::LOG_CAPACITY) {
            Some(n) => usize::try_from(n).map_err(|_| {
                CalculatorError::Settings(format!("{} must not be negative, got {}", keys::LOG_CAPACITY, n))
            })?,
            None => MemoryLog::DEFAULT_CAPACITY,
        };

        let mut calculator = Self::new();
        calculator.view = DisplayView::new(options);
        calculator.log = Box::new(MemoryLog::new(level, capacity));
        Ok(calculator)
    }

    /// Replace the log sink
    pub fn with_sink(mut self, sink: Box<dyn LogSink>) -> Self {
        self.log = sink;
        self
    }

    /// Register the display observer, replacing any previous one
    pub fn subscribe(&mut self, observer: impl DisplayObserver + 'static) {
        self.engine.set_observer(Box::new(observer));
    }

    /// Apply a calculator key and return the display value
    pub fn press(&mut self, key: Key) -> f64 {
        let was_finite = self.engine.display().is_finite();
        let display = self.engine.handle(key);

        if self.log.enabled(LogLevel::Debug) {
            let entry = LogEntry::new(LogLevel::Debug, "key")
                .with_field("key", key)
                .with_field("mode", self.engine.mode().as_str())
                .with_field("display", display);
            self.emit(entry);
        }
        if was_finite && !display.is_finite() {
            let entry = LogEntry::new(LogLevel::Warn, "display is not finite")
                .with_field("display", self.view.render(display));
            self.emit(entry);
        }

        display
    }

    /// Apply a digit given as an integer
    pub fn press_digit(&mut self, value: u8) -> CalculatorResult<f64> {
        let digit = calc_core::Digit::try_from(value)?;
        Ok(self.press(Key::Digit(digit)))
    }

    /// Apply the key bound to a script character (see `Key::from_ascii`)
    pub fn press_char(&mut self, ch: char) -> CalculatorResult<f64> {
        let key = u8::try_from(ch).ok().and_then(Key::from_ascii);
        match key {
            Some(key) => Ok(self.press(key)),
            None => {
                let entry = LogEntry::new(LogLevel::Warn, "unmapped input").with_field("char", ch.escape_default());
                self.emit(entry);
                Err(CalculatorError::UnmappedChar(ch))
            }
        }
    }

    /// Feed every non-whitespace character of `script`, stopping at the first error
    pub fn run_script(&mut self, script: &str) -> CalculatorResult<f64> {
        for ch in script.chars().filter(|c| !c.is_whitespace()) {
            self.press_char(ch)?;
        }
        Ok(self.engine.display())
    }

    /// Process a keyboard event
    pub fn process_input(&mut self, event: InputEvent) -> CalculatorAction {
        // Presses and auto-repeat count, releases do not
        let key_event = match event.as_key() {
            Some(ke) if !ke.is_released() => ke,
            _ => return CalculatorAction::Ignored,
        };

        match key_for_event(key_event) {
            Some(key) => CalculatorAction::Updated(self.press(key)),
            None => {
                if self.log.enabled(LogLevel::Debug) {
                    let entry = LogEntry::new(LogLevel::Debug, "unbound key")
                        .with_field("code", key_event.code)
                        .with_field("modifiers", key_event.modifiers);
                    self.emit(entry);
                }
                CalculatorAction::Ignored
            }
        }
    }

    pub fn display(&self) -> f64 {
        self.engine.display()
    }

    /// Current display rendered as text
    pub fn display_text(&self) -> String {
        self.view.render(self.engine.display())
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        self.engine.snapshot()
    }

    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    pub fn view(&self) -> &DisplayView {
        &self.view
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn log(&self) -> &dyn LogSink {
        self.log.as_ref()
    }

    fn emit(&mut self, entry: LogEntry) {
        self.log.log(entry.with_source(self.session));
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}
