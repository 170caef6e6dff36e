//! # Calculator Console
//!
//! A line-oriented host for the calculator service.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: The calculator never prints; the console renders its display
//! - **Input is a key script**: Each line is a sequence of calculator characters
//! - **Configuration is a file**: Settings come from a versioned JSON document
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A terminal UI with a drawn keypad
//! - An expression language (`2+3*4` is evaluated left to right, like the keys)

pub mod console;
pub mod options;

pub use console::{Console, ConsoleError, ConsoleResult, LineOutcome};
pub use options::{load_settings, parse_args, usage, ConsoleOptions};
