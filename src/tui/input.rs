//! Keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::layout::Panel;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Show or hide a panel.
    Toggle(Panel),
    /// Show or hide dot-prefixed indices.
    ToggleHidden,
}

/// Maps a key press to an action.
pub fn handle_key(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('2') => KeyAction::Toggle(Panel::Nodes),
        KeyCode::Char('3') => KeyAction::Toggle(Panel::Roles),
        KeyCode::Char('4') => KeyAction::Toggle(Panel::Indices),
        KeyCode::Char('5') => KeyAction::Toggle(Panel::Metrics),
        KeyCode::Char('h') | KeyCode::Char('H') => KeyAction::ToggleHidden,
        _ => KeyAction::None,
    }
}
