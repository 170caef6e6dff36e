//! Keyboard to calculator key translation

use calc_core::{Action, BinaryOp, Key};
use input_types::{KeyCode, KeyEvent};

/// Maps a keyboard event to a calculator key.
///
/// Ctrl/Alt chords are never calculator input. On the number row only
/// Shift+8 (`*`) and Shift+= (`+`) carry a meaning when shifted.
pub fn key_for_event(event: &KeyEvent) -> Option<Key> {
    let mods = event.modifiers;
    if mods.is_ctrl() || mods.is_alt() {
        return None;
    }
    let shift = mods.is_shift();

    if let Some(value) = event.code.digit_value() {
        return match event.code {
            KeyCode::Num8 if shift => Some(Key::Operator(BinaryOp::Multiply)),
            _ if shift && !event.code.is_numpad() => None,
            _ => Key::digit(value),
        };
    }

    let key = match event.code {
        KeyCode::Equal if shift => Key::Operator(BinaryOp::Add),
        KeyCode::NumpadPlus => Key::Operator(BinaryOp::Add),
        KeyCode::Minus if !shift => Key::Operator(BinaryOp::Subtract),
        KeyCode::NumpadMinus => Key::Operator(BinaryOp::Subtract),
        KeyCode::NumpadMultiply => Key::Operator(BinaryOp::Multiply),
        KeyCode::Slash if !shift => Key::Operator(BinaryOp::Divide),
        KeyCode::NumpadDivide => Key::Operator(BinaryOp::Divide),

        KeyCode::Equal | KeyCode::Enter | KeyCode::NumpadEnter => Key::Action(Action::Compute),
        KeyCode::Backspace => Key::Action(Action::Delete),
        KeyCode::Escape => Key::Action(Action::Clear),
        KeyCode::Delete => Key::Action(Action::ClearEntry),
        KeyCode::F9 => Key::Action(Action::ToggleSign),

        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use input_types::Modifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::pressed(code, Modifiers::none())
    }

    fn press_shift(code: KeyCode) -> KeyEvent {
        KeyEvent::pressed(code, Modifiers::SHIFT)
    }

    #[test]
    fn test_digits_from_both_rows() {
        assert_eq!(key_for_event(&press(KeyCode::Num4)), Key::digit(4));
        assert_eq!(key_for_event(&press(KeyCode::Numpad9)), Key::digit(9));
        assert_eq!(key_for_event(&press_shift(KeyCode::Numpad1)), Key::digit(1));
    }

    #[test]
    fn test_shifted_number_row() {
        assert_eq!(
            key_for_event(&press_shift(KeyCode::Num8)),
            Some(Key::Operator(BinaryOp::Multiply))
        );
        assert_eq!(key_for_event(&press_shift(KeyCode::Num5)), None);
    }

    #[test]
    fn test_equal_key_doubles_as_plus() {
        assert_eq!(
            key_for_event(&press(KeyCode::Equal)),
            Some(Key::Action(Action::Compute))
        );
        assert_eq!(
            key_for_event(&press_shift(KeyCode::Equal)),
            Some(Key::Operator(BinaryOp::Add))
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            key_for_event(&press(KeyCode::NumpadPlus)),
            Some(Key::Operator(BinaryOp::Add))
        );
        assert_eq!(
            key_for_event(&press(KeyCode::Minus)),
            Some(Key::Operator(BinaryOp::Subtract))
        );
        assert_eq!(
            key_for_event(&press(KeyCode::NumpadMultiply)),
            Some(Key::Operator(BinaryOp::Multiply))
        );
        assert_eq!(
            key_for_event(&press(KeyCode::Slash)),
            Some(Key::Operator(BinaryOp::Divide))
        );
        assert_eq!(key_for_event(&press_shift(KeyCode::Slash)), None);
    }

    #[test]
    fn test_actions() {
        assert_eq!(
            key_for_event(&press(KeyCode::NumpadEnter)),
            Some(Key::Action(Action::Compute))
        );
        assert_eq!(
            key_for_event(&press(KeyCode::Backspace)),
            Some(Key::Action(Action::Delete))
        );
        assert_eq!(
            key_for_event(&press(KeyCode::Escape)),
            Some(Key::Action(Action::Clear))
        );
        assert_eq!(
            key_for_event(&press(KeyCode::Delete)),
            Some(Key::Action(Action::ClearEntry))
        );
        assert_eq!(
            key_for_event(&press(KeyCode::F9)),
            Some(Key::Action(Action::ToggleSign))
        );
    }

    #[test]
    fn test_chords_and_unbound_keys_ignored() {
        assert_eq!(
            key_for_event(&KeyEvent::pressed(KeyCode::Num1, Modifiers::CTRL)),
            None
        );
        assert_eq!(
            key_for_event(&KeyEvent::pressed(KeyCode::Enter, Modifiers::ALT)),
            None
        );
        assert_eq!(key_for_event(&press(KeyCode::Tab)), None);
        assert_eq!(key_for_event(&press(KeyCode::Period)), None);
    }

    #[test]
    fn test_char_events_round_trip_through_keymap() {
        for (ch, key) in [
            ('7', Key::digit(7)),
            ('+', Some(Key::Operator(BinaryOp::Add))),
            ('*', Some(Key::Operator(BinaryOp::Multiply))),
            ('-', Some(Key::Operator(BinaryOp::Subtract))),
            ('/', Some(Key::Operator(BinaryOp::Divide))),
            ('=', Some(Key::Action(Action::Compute))),
        ] {
            let event = KeyEvent::from_char(ch).unwrap();
            assert_eq!(key_for_event(&event), key, "char {:?}", ch);
        }
    }
}
