//! # Calculator Contract Tests
//!
//! This crate provides "golden" tests for the calculator's observable
//! behavior and data formats, so they don't drift accidentally over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Key semantics are written down as key sequences
//! - **Testability first**: Contract tests fail when behavior or formats change
//! - **Mechanism not policy**: Define what must be stable, not how to present it
//!
//! ## Structure
//!
//! - `engine`: display values after canonical key sequences
//! - `snapshot`: serialized field names and shapes of keys and snapshots
//! - `settings`: setting keys, defaults and the overrides file format

pub mod engine;
pub mod settings;
pub mod snapshot;

/// Common test helpers for contract validation
pub mod test_helpers {
    use calc_core::{CalculatorEngine, Key};

    /// Parses a key script (see `Key::from_ascii`), ignoring spaces
    pub fn keys(script: &str) -> Vec<Key> {
        script
            .bytes()
            .filter(|b| *b != b' ')
            .map(|b| {
                Key::from_ascii(b)
                    .unwrap_or_else(|| panic!("No calculator key for {:?}", b as char))
            })
            .collect()
    }

    /// Runs a key script on a fresh engine
    pub fn run(script: &str) -> CalculatorEngine {
        let mut engine = CalculatorEngine::new();
        engine.handle_all(keys(script));
        engine
    }

    /// Verifies the display after `script`, comparing bit patterns
    pub fn verify_display(script: &str, expected: f64) {
        let actual = run(script).display();
        assert!(
            actual.to_bits() == expected.to_bits() || (actual.is_nan() && expected.is_nan()),
            "Display for {:?} changed: expected {:?}, got {:?}",
            script,
            expected,
            actual
        );
    }
}
