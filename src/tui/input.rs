//! Key routing for the dashboard runtime.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Action resolved from one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Leave the dashboard and restore the terminal.
    Quit,
    /// Redraw immediately instead of waiting for the next tick.
    ForceRefresh,
}

/// Resolve a key event to a runtime action, if it maps to one.
#[must_use]
pub fn resolve_key(key: &KeyEvent) -> Option<InputAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(InputAction::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputAction::Quit)
        }
        KeyCode::Char('r') => Some(InputAction::ForceRefresh),
        _ => None,
    }
}
