//! # Calculator Service
//!
//! This crate hosts the calculator engine for interactive front ends.
//!
//! ## Philosophy
//!
//! - **Engine stays pure**: All arithmetic and key semantics live in `calc_core`;
//!   this crate only translates, renders and records
//! - **Typed input**: Keyboard input arrives as structured `KeyEvent`s and is
//!   mapped to calculator keys through an explicit keymap
//! - **Structured logging**: Every key is recorded as a `LogEntry` tagged with
//!   the session it belongs to
//! - **Configurable presentation**: Sign placement and non-finite text come
//!   from the settings registry
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A keypad layout or hit-testing layer
//! - A persisted calculation history
//! - An expression evaluator with precedence

pub mod calculator;
pub mod keymap;
pub mod render;

pub use calculator::{Calculator, CalculatorAction, CalculatorError, CalculatorResult};
pub use keymap::key_for_event;
pub use render::{DisplayOptions, DisplayView, SignPosition};
