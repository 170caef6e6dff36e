//! Display change notification

/// Receives the new display value whenever it changes
pub trait DisplayObserver {
    fn display_changed(&mut self, value: f64);
}

impl<F> DisplayObserver for F
where
    F: FnMut(f64),
{
    fn display_changed(&mut self, value: f64) {
        self(value)
    }
}

/// Compares two display values the way a viewer would notice a change.
///
/// Bitwise equality, except that any NaN equals any other NaN.
pub fn same_display(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
}
