//! Engine snapshot for deterministic replay and parity testing

use crate::{observer::same_display, BinaryOp, EngineMode};
use serde::{Deserialize, Serialize};

/// Complete engine state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub mode: EngineMode,
    pub accumulator: f64,
    pub operand: f64,
    pub pending_op: Option<BinaryOp>,
    pub start_fresh: bool,
    pub display: f64,
}

impl EngineSnapshot {
    /// State equality that treats every NaN as equal to every other NaN
    pub fn same_state(&self, other: &EngineSnapshot) -> bool {
        self.mode == other.mode
            && self.pending_op == other.pending_op
            && self.start_fresh == other.start_fresh
            && same_display(self.accumulator, other.accumulator)
            && same_display(self.operand, other.operand)
            && same_display(self.display, other.display)
    }

    /// Compute a deterministic digest of the snapshot state
    #[cfg(test)]
    pub fn digest(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update([self.mode as u8]);
        hasher.update(self.accumulator.to_le_bytes());
        hasher.update(self.operand.to_le_bytes());
        hasher.update([self.pending_op.map_or(0, |op| op as u8 + 1)]);
        hasher.update([self.start_fresh as u8]);
        hasher.update(self.display.to_le_bytes());

        let result = hasher.finalize();
        let bytes: [u8; 8] = result[..8].try_into().unwrap();
        u64::from_le_bytes(bytes)
    }
}
