mod confirm;
mod edit;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

use confirm::handle_confirm;
use edit::handle_edit;
use navigate::handle_navigate;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Ctrl-C quits from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    app.status = None;

    // Help overlay intercepts all input
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Insert => handle_edit(app, key),
        Mode::Confirm => handle_confirm(app, key),
    }
}

/// Handle a bracketed paste event. Only active while typing into the entry;
/// newlines become spaces since a task is a single line.
pub fn handle_paste(app: &mut App, text: &str) {
    if app.mode != Mode::Insert || text.is_empty() {
        return;
    }
    let clean = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
    app.entry.insert_str(app.entry_cursor, &clean);
    app.entry_cursor += clean.len();
}
