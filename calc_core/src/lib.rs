#![no_std]

//! # Calculator Core
//!
//! The key-input state machine of a four-function pocket calculator.
//!
//! ## Philosophy
//!
//! - **No_std compatible**: Uses alloc but not std
//! - **Deterministic**: Same key trace => same engine state
//! - **Total**: Every key is defined in every state; arithmetic follows IEEE-754,
//!   so division by zero shows infinity or NaN instead of failing
//! - **Mechanism over policy**: The core produces numbers, hosts decide how to show them
//!
//! ## Design
//!
//! The core provides:
//! - CalculatorEngine: State machine over an accumulator and an in-progress operand
//! - Key: Digits, binary operators and control actions as one exhaustive enum
//! - EngineSnapshot: Serializable state for replay and parity testing
//! - DisplayObserver: Change notification for presentation layers
//!
//! Out-of-range digits cannot be constructed (`Digit::new` / `TryFrom<u8>`),
//! so `CalculatorEngine::handle` has no failure path.

extern crate alloc;

pub mod engine;
pub mod key;
pub mod mode;
pub mod observer;
pub mod snapshot;

pub use engine::{CalculatorEngine, CoreOutcome};
pub use key::{Action, BinaryOp, Digit, InvalidDigit, Key};
pub use mode::EngineMode;
pub use observer::{same_display, DisplayObserver};
pub use snapshot::EngineSnapshot;
