use crossterm::event::{KeyEvent, KeyModifiers};

use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Previous,
    Next,
    ToggleHold,
    ViewProduct,
    AddToCart,
    ViewStore,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, keymap: &Keymap) -> Action {
    let binding = KeyBinding::new(key.code, key.modifiers);
    if let Some(action) = keymap.get(&binding) {
        return *action;
    }

    // Some terminals report Shift on uppercase letters, some don't
    if key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT {
        let toggled = key.modifiers ^ KeyModifiers::SHIFT;
        if let Some(action) = keymap.get(&KeyBinding::new(key.code, toggled)) {
            return *action;
        }
    }

    Action::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_default_bindings() {
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(press(KeyCode::Char('q'), KeyModifiers::NONE), &keymap),
            Action::Quit
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char('l'), KeyModifiers::NONE), &keymap),
            Action::Next
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char(' '), KeyModifiers::NONE), &keymap),
            Action::ToggleHold
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Enter, KeyModifiers::NONE), &keymap),
            Action::ViewProduct
        );
    }

    #[test]
    fn test_hardcoded_fallbacks() {
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL), &keymap),
            Action::Quit
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Left, KeyModifiers::NONE), &keymap),
            Action::Previous
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Esc, KeyModifiers::NONE), &keymap),
            Action::Quit
        );
    }

    #[test]
    fn test_unbound_key() {
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(press(KeyCode::Char('z'), KeyModifiers::NONE), &keymap),
            Action::None
        );
    }

    #[test]
    fn test_shift_reporting_tolerated() {
        let config = storyreel_core::config::KeymapConfig {
            add_to_cart: "A".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(
            handle_key_event(press(KeyCode::Char('A'), KeyModifiers::SHIFT), &keymap),
            Action::AddToCart
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char('A'), KeyModifiers::NONE), &keymap),
            Action::AddToCart
        );
    }
}
