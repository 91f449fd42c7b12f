//! Key helpers for the TUI
//!
//! Classifies crossterm key events and applies editing keys to the pending input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::editor::PendingInput;

/// Ctrl+C, quits from anywhere
pub fn is_force_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Ctrl+S, submits from anywhere
pub fn is_submit_shortcut(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Apply an editing key to `input`. Returns whether the key was consumed.
pub fn edit_pending(input: &mut PendingInput, key: &KeyEvent) -> bool {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Char('a') => {
                input.move_home();
                true
            }
            KeyCode::Char('e') => {
                input.move_end();
                true
            }
            KeyCode::Char('u') => {
                input.clear();
                true
            }
            _ => false,
        };
    }

    match key.code {
        KeyCode::Char(c) => {
            input.insert(c);
            true
        }
        KeyCode::Backspace => {
            input.backspace();
            true
        }
        KeyCode::Delete => {
            input.delete();
            true
        }
        KeyCode::Left => {
            input.move_left();
            true
        }
        KeyCode::Right => {
            input.move_right();
            true
        }
        KeyCode::Home => {
            input.move_home();
            true
        }
        KeyCode::End => {
            input.move_end();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_force_quit() {
        assert!(is_force_quit(&ctrl('c')));
        assert!(!is_force_quit(&key(KeyCode::Char('c'))));
        assert!(!is_force_quit(&key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_submit_shortcut() {
        assert!(is_submit_shortcut(&ctrl('s')));
        assert!(!is_submit_shortcut(&key(KeyCode::Char('s'))));
    }

    #[test]
    fn test_edit_pending_chars() {
        let mut input = PendingInput::new();
        assert!(edit_pending(&mut input, &key(KeyCode::Char('h'))));
        assert!(edit_pending(&mut input, &key(KeyCode::Char('i'))));
        assert_eq!(input.content(), "hi");
    }

    #[test]
    fn test_edit_pending_shifted_char_inserts() {
        let mut input = PendingInput::new();
        let upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert!(edit_pending(&mut input, &upper));
        assert_eq!(input.content(), "W");
    }

    #[test]
    fn test_edit_pending_navigation() {
        let mut input = PendingInput::with_content("hello");
        assert!(edit_pending(&mut input, &key(KeyCode::Home)));
        assert_eq!(input.cursor(), 0);
        assert!(edit_pending(&mut input, &key(KeyCode::Right)));
        assert_eq!(input.cursor(), 1);
        assert!(edit_pending(&mut input, &key(KeyCode::End)));
        assert_eq!(input.cursor(), 5);
        assert!(edit_pending(&mut input, &key(KeyCode::Left)));
        assert_eq!(input.cursor(), 4);
        assert!(edit_pending(&mut input, &key(KeyCode::Delete)));
        assert_eq!(input.content(), "hell");
        assert!(edit_pending(&mut input, &key(KeyCode::Backspace)));
        assert_eq!(input.content(), "hel");
    }

    #[test]
    fn test_edit_pending_ctrl_bindings() {
        let mut input = PendingInput::with_content("hello");
        assert!(edit_pending(&mut input, &ctrl('a')));
        assert_eq!(input.cursor(), 0);
        assert!(edit_pending(&mut input, &ctrl('e')));
        assert_eq!(input.cursor(), 5);
        assert!(edit_pending(&mut input, &ctrl('u')));
        assert_eq!(input.content(), "");
    }

    #[test]
    fn test_edit_pending_ignores_control_chars() {
        let mut input = PendingInput::new();
        assert!(!edit_pending(&mut input, &ctrl('s')));
        assert!(!edit_pending(&mut input, &key(KeyCode::Enter)));
        assert!(!edit_pending(&mut input, &key(KeyCode::F(1))));
        assert_eq!(input.content(), "");
    }
}
