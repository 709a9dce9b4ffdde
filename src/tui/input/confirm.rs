use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

/// Clear-all is armed: `y` clears, anything else backs out
pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('y') | KeyCode::Char('Y')) => {
            app.confirm_clear();
        }
        _ => app.cancel_clear(),
    }
}
