#![no_std]

//! # Input Types
//!
//! Keyboard events as the calculator host receives them.
//!
//! ## Philosophy
//!
//! - **Events, not bytes**: A key press is a `KeyEvent` with a logical code,
//!   the active modifiers and a press/release/repeat state
//! - **Replayable**: Events serialize, so recorded sessions can be fed back in tests
//! - **Meaning lives elsewhere**: These types say which key moved; what that key
//!   does to a calculation is decided by the consumer's keymap
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A scan-code decoder
//! - Pointer or touch input (keypad hit-testing belongs to the presentation layer)
//! - A keyboard layout database (only the US symbols a calculator needs)

extern crate alloc;

use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Event delivered to an input consumer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Key(KeyEvent),
}

impl InputEvent {
    pub fn key(event: KeyEvent) -> Self {
        InputEvent::Key(event)
    }

    pub fn as_key(&self) -> Option<&KeyEvent> {
        let InputEvent::Key(event) = self;
        Some(event)
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        InputEvent::Key(event)
    }
}

/// One transition of one key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub state: KeyState,
    /// Character the platform produced, when it produced one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl KeyEvent {
    pub fn new(code: KeyCode, modifiers: Modifiers, state: KeyState) -> Self {
        KeyEvent {
            code,
            modifiers,
            state,
            text: None,
        }
    }

    pub fn pressed(code: KeyCode, modifiers: Modifiers) -> Self {
        KeyEvent::new(code, modifiers, KeyState::Down)
    }

    pub fn released(code: KeyCode, modifiers: Modifiers) -> Self {
        KeyEvent::new(code, modifiers, KeyState::Up)
    }

    pub fn repeat(code: KeyCode, modifiers: Modifiers) -> Self {
        KeyEvent::new(code, modifiers, KeyState::Repeat)
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        KeyEvent {
            text: Some(text.into()),
            ..self
        }
    }

    /// Press event a US keyboard produces for `ch`.
    ///
    /// `+` and `*` are Shift on the `=` and `8` keys.
    pub fn from_char(ch: char) -> Option<Self> {
        let plain = Modifiers::NONE;
        let (code, modifiers) = match ch {
            '0'..='9' => (KeyCode::from_digit(ch as u8 - b'0')?, plain),
            '+' => (KeyCode::Equal, Modifiers::SHIFT),
            '*' => (KeyCode::Num8, Modifiers::SHIFT),
            '=' => (KeyCode::Equal, plain),
            '-' => (KeyCode::Minus, plain),
            '/' => (KeyCode::Slash, plain),
            '.' => (KeyCode::Period, plain),
            '\n' | '\r' => (KeyCode::Enter, plain),
            '\t' => (KeyCode::Tab, plain),
            '\u{8}' | '\u{7f}' => (KeyCode::Backspace, plain),
            '\u{1b}' => (KeyCode::Escape, plain),
            _ => return None,
        };
        let mut buf = [0u8; 4];
        let text: &str = ch.encode_utf8(&mut buf);
        Some(KeyEvent::pressed(code, modifiers).with_text(text))
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self.state, KeyState::Down)
    }

    pub fn is_released(&self) -> bool {
        matches!(self.state, KeyState::Up)
    }

    pub fn is_repeat(&self) -> bool {
        matches!(self.state, KeyState::Repeat)
    }
}

/// Press, release or auto-repeat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyState {
    Down,
    Up,
    /// Held long enough for the platform to repeat it
    Repeat,
}

impl fmt::Display for KeyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyState::Down => "down",
            KeyState::Up => "up",
            KeyState::Repeat => "repeat",
        })
    }
}

/// Logical key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,

    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    NumpadPlus,
    NumpadMinus,
    NumpadMultiply,
    NumpadDivide,
    NumpadEnter,

    Minus,
    Equal,
    Slash,
    Period,

    Enter,
    Backspace,
    Delete,
    Escape,
    Tab,
    F9,

    Unknown,
}

const NUMBER_ROW: [KeyCode; 10] = [
    KeyCode::Num0,
    KeyCode::Num1,
    KeyCode::Num2,
    KeyCode::Num3,
    KeyCode::Num4,
    KeyCode::Num5,
    KeyCode::Num6,
    KeyCode::Num7,
    KeyCode::Num8,
    KeyCode::Num9,
];

const NUMPAD_DIGITS: [KeyCode; 10] = [
    KeyCode::Numpad0,
    KeyCode::Numpad1,
    KeyCode::Numpad2,
    KeyCode::Numpad3,
    KeyCode::Numpad4,
    KeyCode::Numpad5,
    KeyCode::Numpad6,
    KeyCode::Numpad7,
    KeyCode::Numpad8,
    KeyCode::Numpad9,
];

impl KeyCode {
    /// Number-row key for `value`, `None` above 9
    pub fn from_digit(value: u8) -> Option<Self> {
        NUMBER_ROW.get(usize::from(value)).copied()
    }

    /// Digit printed on a number-row or numpad key
    pub fn digit_value(&self) -> Option<u8> {
        NUMBER_ROW
            .iter()
            .position(|code| code == self)
            .or_else(|| NUMPAD_DIGITS.iter().position(|code| code == self))
            .map(|index| index as u8)
    }

    pub fn is_numpad(&self) -> bool {
        NUMPAD_DIGITS.contains(self)
            || matches!(
                self,
                KeyCode::NumpadPlus
                    | KeyCode::NumpadMinus
                    | KeyCode::NumpadMultiply
                    | KeyCode::NumpadDivide
                    | KeyCode::NumpadEnter
            )
    }

    /// Short label as printed on the keycap
    pub fn label(&self) -> &'static str {
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        if let Some(value) = self.digit_value() {
            return DIGITS[usize::from(value)];
        }
        match self {
            KeyCode::NumpadPlus => "+",
            KeyCode::NumpadMinus | KeyCode::Minus => "-",
            KeyCode::NumpadMultiply => "*",
            KeyCode::NumpadDivide | KeyCode::Slash => "/",
            KeyCode::NumpadEnter | KeyCode::Enter => "Enter",
            KeyCode::Equal => "=",
            KeyCode::Period => ".",
            KeyCode::Backspace => "Backspace",
            KeyCode::Delete => "Del",
            KeyCode::Escape => "Esc",
            KeyCode::Tab => "Tab",
            KeyCode::F9 => "F9",
            _ => "?",
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_numpad() {
            write!(f, "Numpad{}", self.label())
        } else {
            f.write_str(self.label())
        }
    }
}

/// Modifier keys held during an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Self = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
    };
    pub const CTRL: Self = Modifiers {
        ctrl: true,
        ..Self::NONE
    };
    pub const ALT: Self = Modifiers {
        alt: true,
        ..Self::NONE
    };
    pub const SHIFT: Self = Modifiers {
        shift: true,
        ..Self::NONE
    };

    pub fn none() -> Self {
        Self::NONE
    }

    /// Union of both sets
    pub fn with(self, other: Modifiers) -> Self {
        Modifiers {
            ctrl: self.ctrl || other.ctrl,
            alt: self.alt || other.alt,
            shift: self.shift || other.shift,
        }
    }

    pub fn contains(&self, other: Modifiers) -> bool {
        self.with(other) == *self
    }

    pub fn is_ctrl(&self) -> bool {
        self.ctrl
    }

    pub fn is_alt(&self) -> bool {
        self.alt
    }

    pub fn is_shift(&self) -> bool {
        self.shift
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let held = [(self.ctrl, "Ctrl"), (self.alt, "Alt"), (self.shift, "Shift")];
        let mut first = true;
        for (_, name) in held.iter().filter(|(on, _)| *on) {
            if !first {
                f.write_str("+")?;
            }
            f.write_str(name)?;
            first = false;
        }
        Ok(())
    }
}
