//! Key bindings: normal and vim-style.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use puyotui::Intent;

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    Pause,
    Quit,
    None,
}

impl Action {
    /// Simulation intent for this action, if it is one.
    pub fn intent(self) -> Option<Intent> {
        match self {
            Self::MoveLeft => Some(Intent::MoveLeft),
            Self::MoveRight => Some(Intent::MoveRight),
            Self::Rotate => Some(Intent::Rotate),
            Self::SoftDrop => Some(Intent::SoftDrop),
            _ => None,
        }
    }
}

/// Map key event to game action. Supports both normal (arrows) and vim (hjkl).
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent { code, modifiers, .. } = key;
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if !no_mod && modifiers != KeyModifiers::CONTROL {
        return Action::None;
    }
    match code {
        KeyCode::Char('q') | KeyCode::Esc if no_mod => Action::Quit,
        KeyCode::Char('p') | KeyCode::Char(' ') if modifiers == KeyModifiers::CONTROL => {
            Action::Pause
        }
        KeyCode::Char('p') if no_mod => Action::Pause,
        KeyCode::Left | KeyCode::Char('h') if no_mod => Action::MoveLeft,
        KeyCode::Right | KeyCode::Char('l') if no_mod => Action::MoveRight,
        KeyCode::Up | KeyCode::Char('k') if no_mod => Action::Rotate,
        KeyCode::Char('i') if no_mod => Action::Rotate,
        KeyCode::Down | KeyCode::Char('j') if no_mod => Action::SoftDrop,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn test_arrows_and_vim_agree() {
        for (a, b, expected) in [
            (KeyCode::Left, KeyCode::Char('h'), Action::MoveLeft),
            (KeyCode::Right, KeyCode::Char('l'), Action::MoveRight),
            (KeyCode::Up, KeyCode::Char('k'), Action::Rotate),
            (KeyCode::Down, KeyCode::Char('j'), Action::SoftDrop),
        ] {
            assert_eq!(key_to_action(KeyEvent::from(a)), expected);
            assert_eq!(key_to_action(KeyEvent::from(b)), expected);
        }
    }

    #[test]
    fn test_modified_keys_are_ignored() {
        let key = KeyEvent::new(KeyCode::Left, KeyModifiers::ALT);
        assert_eq!(key_to_action(key), Action::None);
    }
}
