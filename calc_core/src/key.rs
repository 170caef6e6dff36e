//! Platform-independent calculator keys

use core::fmt;
use serde::{Deserialize, Serialize};

/// A single decimal digit, 0 through 9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Creates a digit, rejecting values above 9
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Returns the digit value
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the digit as a float, for arithmetic on operand slots
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

/// Error returned when an integer is not a decimal digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDigit(pub u8);

impl fmt::Display for InvalidDigit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not a decimal digit", self.0)
    }
}

impl TryFrom<u8> for Digit {
    type Error = InvalidDigit;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Digit::new(value).ok_or(InvalidDigit(value))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    /// Evaluates `a op b` with IEEE-754 semantics.
    ///
    /// Division by zero yields an infinity (or NaN for `0 / 0`), never a fault.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Subtract => a - b,
            BinaryOp::Multiply => a * b,
            BinaryOp::Divide => a / b,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Subtract => '-',
            BinaryOp::Multiply => '*',
            BinaryOp::Divide => '/',
        }
    }
}

/// Control action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Full reset (C)
    Clear,
    /// Reset only the operand being edited (CE)
    ClearEntry,
    /// Drop the last entered digit
    Delete,
    /// Negate the operand being edited
    ToggleSign,
    /// Evaluate the pending operation (=)
    Compute,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Clear => "C",
            Action::ClearEntry => "CE",
            Action::Delete => "DEL",
            Action::ToggleSign => "+/-",
            Action::Compute => "=",
        }
    }
}

/// Calculator key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Digit(Digit),
    Operator(BinaryOp),
    Action(Action),
}

impl Key {
    /// Builds a digit key, `None` if `value > 9`
    pub const fn digit(value: u8) -> Option<Self> {
        match Digit::new(value) {
            Some(d) => Some(Key::Digit(d)),
            None => None,
        }
    }

    /// Convert an ASCII byte to a key (for line-oriented hosts)
    pub fn from_ascii(byte: u8) -> Option<Self> {
        match byte {
            b'0'..=b'9' => Key::digit(byte - b'0'),
            b'+' => Some(Key::Operator(BinaryOp::Add)),
            b'-' => Some(Key::Operator(BinaryOp::Subtract)),
            b'*' | b'x' | b'X' => Some(Key::Operator(BinaryOp::Multiply)),
            b'/' => Some(Key::Operator(BinaryOp::Divide)),
            b'=' | b'\r' | b'\n' => Some(Key::Action(Action::Compute)),
            0x08 | 0x7F => Some(Key::Action(Action::Delete)),
            b'c' | b'C' => Some(Key::Action(Action::Clear)),
            b'e' | b'E' => Some(Key::Action(Action::ClearEntry)),
            b'n' | b'N' | b'~' => Some(Key::Action(Action::ToggleSign)),
            _ => None,
        }
    }
}

impl From<Digit> for Key {
    fn from(digit: Digit) -> Self {
        Key::Digit(digit)
    }
}

impl From<BinaryOp> for Key {
    fn from(op: BinaryOp) -> Self {
        Key::Operator(op)
    }
}

impl From<Action> for Key {
    fn from(action: Action) -> Self {
        Key::Action(action)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Digit(d) => write!(f, "{}", d),
            Key::Operator(op) => write!(f, "{}", op.symbol()),
            Key::Action(action) => f.write_str(action.as_str()),
        }
    }
}
