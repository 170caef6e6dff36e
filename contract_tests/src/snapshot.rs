//! Data format contract tests
//!
//! These tests define the stable serialized form of keys and engine snapshots.

// ===== Canonical Field Names =====
#[allow(dead_code)]
const SNAPSHOT_FIELDS: [&str; 6] = [
    "mode",
    "accumulator",
    "operand",
    "pending_op",
    "start_fresh",
    "display",
];
