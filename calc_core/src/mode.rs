//! Engine modes

use serde::{Deserialize, Serialize};

/// Logical state of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineMode {
    /// No operator in flight, digits edit the accumulator
    Idle,
    /// An operator waits for its second operand, digits edit the operand
    PendingOp,
}

impl EngineMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineMode::Idle => "IDLE",
            EngineMode::PendingOp => "PENDING",
        }
    }
}
