//! CalculatorEngine state machine
//!
//! Turns a stream of keys into an accumulator and a display value with
//! pocket-calculator semantics: strict left-to-right chaining, fresh entry
//! after an operator, sign-aware digit entry and truncating backspace.

use alloc::boxed::Box;

use crate::{
    key::{Action, BinaryOp, Digit, Key},
    mode::EngineMode,
    observer::{same_display, DisplayObserver},
    snapshot::EngineSnapshot,
};

/// Outcome from applying a key to the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoreOutcome {
    /// The display kept its value
    Unchanged,
    /// The display now shows a new value
    DisplayChanged(f64),
}

/// Calculator engine state machine
pub struct CalculatorEngine {
    accumulator: f64,
    operand: f64,
    pending_op: Option<BinaryOp>,
    start_fresh: bool,
    display: f64,
    observer: Option<Box<dyn DisplayObserver>>,
}

impl CalculatorEngine {
    /// Create an engine in the Idle state with everything zeroed
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            operand: 0.0,
            pending_op: None,
            start_fresh: false,
            display: 0.0,
            observer: None,
        }
    }

    /// Rebuild an engine from a snapshot.
    ///
    /// The display is taken from the active slot, not from the snapshot.
    pub fn from_snapshot(snapshot: &EngineSnapshot) -> Self {
        let mut engine = Self {
            accumulator: snapshot.accumulator,
            operand: snapshot.operand,
            pending_op: snapshot.pending_op,
            start_fresh: snapshot.start_fresh,
            display: 0.0,
            observer: None,
        };
        engine.display = engine.active();
        engine
    }

    /// Process one key and return the new display value
    pub fn handle(&mut self, key: Key) -> f64 {
        let previous = self.display;

        match key {
            Key::Digit(digit) => self.enter_digit(digit),
            Key::Operator(op) => self.press_operator(op),
            Key::Action(action) => self.run_action(action),
        }

        if !same_display(previous, self.display) {
            if let Some(observer) = self.observer.as_mut() {
                observer.display_changed(self.display);
            }
        }

        self.display
    }

    /// Process one key and report whether the display changed
    pub fn apply_key(&mut self, key: Key) -> CoreOutcome {
        let previous = self.display;
        let display = self.handle(key);
        if same_display(previous, display) {
            CoreOutcome::Unchanged
        } else {
            CoreOutcome::DisplayChanged(display)
        }
    }

    /// Process a sequence of keys and return the final display value
    pub fn handle_all<I>(&mut self, keys: I) -> f64
    where
        I: IntoIterator<Item = Key>,
    {
        for key in keys {
            self.handle(key);
        }
        self.display
    }

    /// Register the observer notified on display changes, replacing any previous one
    pub fn set_observer(&mut self, observer: Box<dyn DisplayObserver>) {
        self.observer = Some(observer);
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Get a complete snapshot of engine state
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            mode: self.mode(),
            accumulator: self.accumulator,
            operand: self.operand,
            pending_op: self.pending_op,
            start_fresh: self.start_fresh,
            display: self.display,
        }
    }

    // Public accessors for rendering/testing
    pub fn mode(&self) -> EngineMode {
        if self.pending_op.is_some() {
            EngineMode::PendingOp
        } else {
            EngineMode::Idle
        }
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn operand(&self) -> f64 {
        self.operand
    }

    pub fn pending_op(&self) -> Option<BinaryOp> {
        self.pending_op
    }

    pub fn start_fresh(&self) -> bool {
        self.start_fresh
    }

    pub fn display(&self) -> f64 {
        self.display
    }

    /// Value of the slot digit entry currently targets
    pub fn active(&self) -> f64 {
        match self.mode() {
            EngineMode::Idle => self.accumulator,
            EngineMode::PendingOp => self.operand,
        }
    }

    // Private transitions

    fn active_mut(&mut self) -> &mut f64 {
        match self.mode() {
            EngineMode::Idle => &mut self.accumulator,
            EngineMode::PendingOp => &mut self.operand,
        }
    }

    /// Write the active slot and mirror it to the display
    fn set_active(&mut self, value: f64) {
        *self.active_mut() = value;
        self.display = value;
    }

    fn enter_digit(&mut self, digit: Digit) {
        if self.start_fresh {
            *self.active_mut() = 0.0;
            self.start_fresh = false;
        }

        let current = self.active();
        // The sign bit, not `< 0`, so that a toggled zero (-0.0) builds negative numbers
        let step = if current.is_sign_negative() {
            -digit.as_f64()
        } else {
            digit.as_f64()
        };
        self.set_active(current * 10.0 + step);
    }

    fn press_operator(&mut self, op: BinaryOp) {
        if let Some(pending) = self.pending_op {
            self.accumulator = pending.apply(self.accumulator, self.operand);
        }

        self.pending_op = Some(op);
        self.operand = self.accumulator;
        self.display = self.accumulator;
        self.start_fresh = true;
    }

    fn run_action(&mut self, action: Action) {
        match action {
            Action::Compute => {
                let Some(pending) = self.pending_op else {
                    return;
                };
                self.accumulator = pending.apply(self.accumulator, self.operand);
                self.display = self.accumulator;
                self.pending_op = None;
                self.start_fresh = true;
            }
            Action::ClearEntry => self.set_active(0.0),
            Action::Clear => {
                // operand is left alone; it is unreachable once no operator is pending
                self.accumulator = 0.0;
                self.pending_op = None;
                self.start_fresh = false;
                self.display = 0.0;
            }
            Action::Delete => {
                if self.start_fresh {
                    self.start_fresh = false;
                    self.set_active(0.0);
                    return;
                }
                let current = self.active();
                self.set_active(truncate_last_digit(current));
            }
            Action::ToggleSign => {
                let current = self.active();
                self.set_active(-current);
            }
        }
    }
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Drops the last decimal digit, rounding toward zero (`-12` becomes `-1`)
fn truncate_last_digit(value: f64) -> f64 {
    // `%` on f64 keeps the sign of the dividend
    (value - value % 10.0) / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn d(value: u8) -> Key {
        Key::digit(value).unwrap()
    }

    fn op(op: BinaryOp) -> Key {
        Key::Operator(op)
    }

    fn act(action: Action) -> Key {
        Key::Action(action)
    }

    fn assert_display_matches_active(engine: &CalculatorEngine) {
        assert!(same_display(engine.display(), engine.active()));
    }

    #[test]
    fn test_initial_state() {
        let engine = CalculatorEngine::new();
        assert_eq!(engine.mode(), EngineMode::Idle);
        assert_eq!(engine.display(), 0.0);
        assert_eq!(engine.pending_op(), None);
        assert!(!engine.start_fresh());
    }

    #[test]
    fn test_digit_entry_builds_number() {
        let mut engine = CalculatorEngine::new();
        assert_eq!(engine.handle_all([d(1), d(2), d(3)]), 123.0);
        assert_eq!(engine.accumulator(), 123.0);
        assert_display_matches_active(&engine);
    }

    #[test]
    fn test_leading_zero_ignored() {
        let mut engine = CalculatorEngine::new();
        assert_eq!(engine.handle_all([d(0), d(0), d(7)]), 7.0);
    }

    #[test]
    fn test_negative_entry_grows_away_from_zero() {
        let mut engine = CalculatorEngine::new();
        engine.handle_all([d(1), act(Action::ToggleSign)]);
        assert_eq!(engine.display(), -1.0);
        assert_eq!(engine.handle(d(5)), -15.0);
    }

    #[test]
    fn test_toggle_sign_on_zero_makes_entry_negative() {
        let mut engine = CalculatorEngine::new();
        engine.handle(act(Action::ToggleSign));
        assert!(engine.display().is_sign_negative());
        assert_eq!(engine.handle_all([d(1), d(2)]), -12.0);
    }

    #[test]
    fn test_operator_starts_fresh_operand() {
        let mut engine = CalculatorEngine::new();
        engine.handle_all([d(1), d(2), op(BinaryOp::Add)]);
        assert_eq!(engine.mode(), EngineMode::PendingOp);
        assert_eq!(engine.operand(), 12.0);
        assert!(engine.start_fresh());

        assert_eq!(engine.handle(d(3)), 3.0);
        assert_eq!(engine.operand(), 3.0);
        assert_eq!(engine.accumulator(), 12.0);
        assert_display_matches_active(&engine);
    }

    #[test]
    fn test_chained_evaluation_left_to_right() {
        let mut engine = CalculatorEngine::new();
        let display = engine.handle_all([
            d(5),
            op(BinaryOp::Add),
            d(3),
            op(BinaryOp::Add),
            d(2),
            act(Action::Compute),
        ]);
        assert_eq!(display, 10.0);

        // 2 + 3 * 4 = 20 without precedence
        engine.handle(act(Action::Clear));
        let display = engine.handle_all([
            d(2),
            op(BinaryOp::Add),
            d(3),
            op(BinaryOp::Multiply),
            d(4),
            act(Action::Compute),
        ]);
        assert_eq!(display, 20.0);
    }

    #[test]
    fn test_intermediate_result_shown_on_second_operator() {
        let mut engine = CalculatorEngine::new();
        assert_eq!(
            engine.handle_all([d(5), op(BinaryOp::Add), d(3), op(BinaryOp::Subtract)]),
            8.0
        );
    }

    #[test]
    fn test_operator_without_second_operand_uses_mirror() {
        // 6 * = squares: the operand mirrors the accumulator
        let mut engine = CalculatorEngine::new();
        assert_eq!(
            engine.handle_all([d(6), op(BinaryOp::Multiply), act(Action::Compute)]),
            36.0
        );
    }

    #[test]
    fn test_replacing_operator_applies_mirror() {
        // 5 + * : the second operator commits 5 + 5 first
        let mut engine = CalculatorEngine::new();
        assert_eq!(
            engine.handle_all([d(5), op(BinaryOp::Add), op(BinaryOp::Multiply)]),
            10.0
        );
        assert_eq!(engine.pending_op(), Some(BinaryOp::Multiply));
    }

    #[test]
    fn test_compute_without_pending_is_noop() {
        let mut engine = CalculatorEngine::new();
        engine.handle_all([d(4), d(2)]);
        let before = engine.snapshot();
        assert_eq!(engine.apply_key(act(Action::Compute)), CoreOutcome::Unchanged);
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_compute_twice_does_not_repeat() {
        let mut engine = CalculatorEngine::new();
        engine.handle_all([d(2), op(BinaryOp::Add), d(3), act(Action::Compute)]);
        assert_eq!(engine.handle(act(Action::Compute)), 5.0);
    }

    #[test]
    fn test_digit_after_compute_starts_new_number() {
        let mut engine = CalculatorEngine::new();
        engine.handle_all([d(2), op(BinaryOp::Add), d(3), act(Action::Compute)]);
        assert_eq!(engine.handle(d(9)), 9.0);
        assert_eq!(engine.accumulator(), 9.0);
        assert_eq!(engine.mode(), EngineMode::Idle);
    }

    #[test]
    fn test_divide_by_zero() {
        let mut engine = CalculatorEngine::new();
        let display =
            engine.handle_all([d(7), op(BinaryOp::Divide), d(0), act(Action::Compute)]);
        assert_eq!(display, f64::INFINITY);

        engine.handle(act(Action::Clear));
        let display =
            engine.handle_all([d(0), op(BinaryOp::Divide), d(0), act(Action::Compute)]);
        assert!(display.is_nan());
    }

    #[test]
    fn test_clear_resets_everything_visible() {
        let mut engine = CalculatorEngine::new();
        engine.handle_all([d(9), op(BinaryOp::Multiply), d(8)]);
        assert_eq!(engine.handle(act(Action::Clear)), 0.0);
        assert_eq!(engine.pending_op(), None);
        assert_eq!(engine.accumulator(), 0.0);
        assert!(!engine.start_fresh());
        // operand is not reset
        assert_eq!(engine.operand(), 8.0);
    }

    #[test]
    fn test_clear_entry_keeps_pending_operation() {
        let mut engine = CalculatorEngine::new();
        engine.handle_all([d(8), op(BinaryOp::Subtract), d(9), d(9)]);
        assert_eq!(engine.handle(act(Action::ClearEntry)), 0.0);
        assert_eq!(engine.accumulator(), 8.0);
        assert_eq!(engine.pending_op(), Some(BinaryOp::Subtract));

        assert_eq!(engine.handle_all([d(3), act(Action::Compute)]), 5.0);
    }

    #[test]
    fn test_clear_entry_in_idle_clears_accumulator() {
        let mut engine = CalculatorEngine::new();
        engine.handle_all([d(4), d(4)]);
        engine.handle(act(Action::ClearEntry));
        assert_eq!(engine.accumulator(), 0.0);
        assert_eq!(engine.handle(d(1)), 1.0);
    }

    #[test]
    fn test_delete_truncates() {
        let mut engine = CalculatorEngine::new();
        engine.handle_all([d(1), d(2), d(3)]);
        assert_eq!(engine.handle(act(Action::Delete)), 12.0);
        assert_eq!(engine.handle(act(Action::Delete)), 1.0);
        assert_eq!(engine.handle(act(Action::Delete)), 0.0);
        assert_eq!(engine.handle(act(Action::Delete)), 0.0);
    }

    #[test]
    fn test_delete_negative_truncates_toward_zero() {
        let mut engine = CalculatorEngine::new();
        engine.handle_all([act(Action::ToggleSign), d(1), d(2)]);
        assert_eq!(engine.display(), -12.0);
        assert_eq!(engine.handle(act(Action::Delete)), -1.0);
    }

    #[test]
    fn test_delete_after_operator_clears_operand() {
        let mut engine = CalculatorEngine::new();
        engine.handle_all([d(4), d(5), op(BinaryOp::Add)]);
        assert_eq!(engine.handle(act(Action::Delete)), 0.0);
        assert!(!engine.start_fresh());
        assert_eq!(engine.operand(), 0.0);
        assert_eq!(engine.accumulator(), 45.0);

        // the cleared operand is appended to, not replaced
        assert_eq!(engine.handle_all([d(5), act(Action::Compute)]), 50.0);
    }

    #[test]
    fn test_delete_after_compute_clears_result() {
        let mut engine = CalculatorEngine::new();
        engine.handle_all([d(9), op(BinaryOp::Add), d(1), act(Action::Compute)]);
        assert_eq!(engine.handle(act(Action::Delete)), 0.0);
        assert_eq!(engine.accumulator(), 0.0);
    }

    #[test]
    fn test_toggle_sign_on_result_edits_result() {
        let mut engine = CalculatorEngine::new();
        engine.handle_all([d(9), op(BinaryOp::Add), d(1), act(Action::Compute)]);
        assert_eq!(engine.handle(act(Action::ToggleSign)), -10.0);
        assert!(engine.start_fresh());
        // start_fresh survives the toggle, so the next digit replaces the value
        assert_eq!(engine.handle(d(3)), 3.0);
    }

    #[test]
    fn test_toggle_sign_on_operand() {
        let mut engine = CalculatorEngine::new();
        let display = engine.handle_all([
            d(1),
            d(0),
            op(BinaryOp::Add),
            d(4),
            act(Action::ToggleSign),
            act(Action::Compute),
        ]);
        assert_eq!(display, 6.0);
    }

    #[test]
    fn test_observer_notified_on_change_only() {
        let seen: Rc<RefCell<Vec<f64>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut engine = CalculatorEngine::new();
        engine.set_observer(Box::new(move |v: f64| sink.borrow_mut().push(v)));

        engine.handle_all([
            d(0), // 0 -> 0, no change
            d(5),
            op(BinaryOp::Add), // display stays 5
            d(5),
            act(Action::Compute),
            act(Action::Compute), // no-op
        ]);

        assert_eq!(*seen.borrow(), vec![5.0, 10.0]);

        engine.clear_observer();
        engine.handle(d(1));
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_nan_does_not_renotify() {
        let count = Rc::new(RefCell::new(0usize));
        let counter = Rc::clone(&count);

        let mut engine = CalculatorEngine::new();
        engine.set_observer(Box::new(move |_: f64| *counter.borrow_mut() += 1));
        engine.handle_all([d(0), op(BinaryOp::Divide), d(0), act(Action::Compute)]);
        assert_eq!(*count.borrow(), 1);

        // NaN - NaN stays NaN
        engine.handle_all([op(BinaryOp::Subtract), act(Action::Compute)]);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_snapshot_restore_resumes_identically() {
        let mut original = CalculatorEngine::new();
        original.handle_all([d(1), d(2), op(BinaryOp::Multiply), d(3)]);

        let mut restored = CalculatorEngine::from_snapshot(&original.snapshot());
        assert!(restored.snapshot().same_state(&original.snapshot()));

        let tail = [d(4), op(BinaryOp::Subtract), d(8), act(Action::Compute)];
        assert_eq!(original.handle_all(tail), restored.handle_all(tail));
        assert_eq!(restored.display(), 400.0);
    }

    #[test]
    fn test_restore_recomputes_display_from_active_slot() {
        let snapshot = EngineSnapshot {
            mode: EngineMode::PendingOp,
            accumulator: 3.0,
            operand: 4.0,
            pending_op: Some(BinaryOp::Add),
            start_fresh: false,
            display: 99.0,
        };
        let engine = CalculatorEngine::from_snapshot(&snapshot);
        assert_eq!(engine.display(), 4.0);
    }

    #[test]
    fn test_deterministic_replay() {
        let keys = [
            d(3),
            op(BinaryOp::Divide),
            d(4),
            act(Action::Compute),
            act(Action::ToggleSign),
            op(BinaryOp::Add),
            d(1),
            act(Action::Delete),
            d(2),
            act(Action::Compute),
        ];
        let mut a = CalculatorEngine::new();
        let mut b = CalculatorEngine::new();
        a.handle_all(keys);
        b.handle_all(keys);
        assert_eq!(a.snapshot().digest(), b.snapshot().digest());
        assert_eq!(a.display(), 1.25);
    }

    #[test]
    fn test_truncate_last_digit() {
        assert_eq!(truncate_last_digit(123.0), 12.0);
        assert_eq!(truncate_last_digit(-12.0), -1.0);
        assert_eq!(truncate_last_digit(7.0), 0.0);
        assert_eq!(truncate_last_digit(2.5), 0.0);
    }
}
