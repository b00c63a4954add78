//! Key mapping for each screen.
//!
//! Screens never see crossterm types; keys are translated here into the
//! per-screen input enums.

use crate::drill::DrillInput;
use crate::menu::MenuInput;
use crate::race::{RaceInput, Side};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Ctrl+C quits from anywhere.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
}

/// Key releases and repeats reported by some terminals are ignored.
pub fn is_press(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

pub fn map_menu_key(key: &KeyEvent) -> MenuInput {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => MenuInput::Up,
        KeyCode::Down | KeyCode::Char('j') => MenuInput::Down,
        KeyCode::Left | KeyCode::Char('h') => MenuInput::Left,
        KeyCode::Right | KeyCode::Char('l') => MenuInput::Right,
        KeyCode::Enter | KeyCode::Char(' ') => MenuInput::Select,
        KeyCode::Tab => MenuInput::ToggleOrder,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => MenuInput::Quit,
        _ => MenuInput::Other,
    }
}

pub fn map_drill_key(key: &KeyEvent) -> DrillInput {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Right => DrillInput::Next,
        KeyCode::Char('s') | KeyCode::Char('S') => DrillInput::ToggleSound,
        KeyCode::Char('b') | KeyCode::Char('B') => DrillInput::CycleBackground,
        KeyCode::Char('c') | KeyCode::Char('C') => DrillInput::ToggleCase,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => DrillInput::Menu,
        _ => DrillInput::Other,
    }
}

pub fn map_race_key(key: &KeyEvent) -> RaceInput {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => RaceInput::Select(Side::Left),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => {
            RaceInput::Select(Side::Right)
        }
        KeyCode::Up | KeyCode::Char(' ') => RaceInput::Repeat,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => RaceInput::Menu,
        _ => RaceInput::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(map_menu_key(&key(KeyCode::Up)), MenuInput::Up);
        assert_eq!(map_menu_key(&key(KeyCode::Enter)), MenuInput::Select);
        assert_eq!(map_menu_key(&key(KeyCode::Tab)), MenuInput::ToggleOrder);
        assert_eq!(map_menu_key(&key(KeyCode::Char('q'))), MenuInput::Quit);
        assert_eq!(map_menu_key(&key(KeyCode::Char('x'))), MenuInput::Other);
    }

    #[test]
    fn test_drill_keys() {
        assert_eq!(map_drill_key(&key(KeyCode::Char(' '))), DrillInput::Next);
        assert_eq!(map_drill_key(&key(KeyCode::Char('s'))), DrillInput::ToggleSound);
        assert_eq!(map_drill_key(&key(KeyCode::Char('b'))), DrillInput::CycleBackground);
        assert_eq!(map_drill_key(&key(KeyCode::Char('C'))), DrillInput::ToggleCase);
        assert_eq!(map_drill_key(&key(KeyCode::Esc)), DrillInput::Menu);
        assert_eq!(map_drill_key(&key(KeyCode::Up)), DrillInput::Other);
    }

    #[test]
    fn test_race_keys() {
        assert_eq!(
            map_race_key(&key(KeyCode::Left)),
            RaceInput::Select(Side::Left)
        );
        assert_eq!(
            map_race_key(&key(KeyCode::Char('l'))),
            RaceInput::Select(Side::Right)
        );
        assert_eq!(map_race_key(&key(KeyCode::Up)), RaceInput::Repeat);
        assert_eq!(map_race_key(&key(KeyCode::Esc)), RaceInput::Menu);
        assert_eq!(map_race_key(&key(KeyCode::Enter)), RaceInput::Other);
    }

    #[test]
    fn test_ctrl_c_is_interrupt() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(is_interrupt(&ctrl_c));
        assert!(!is_interrupt(&key(KeyCode::Char('c'))));
        assert!(is_press(&ctrl_c));
    }
}
