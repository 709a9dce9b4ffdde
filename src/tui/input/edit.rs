use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::util::unicode::{
    next_grapheme_boundary, prev_grapheme_boundary, word_boundary_left, word_boundary_right,
};

/// Keys while typing into the entry
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Enter) => {
            app.submit_entry();
        }
        // Leave the entry to pick a filter tab without losing the draft
        (_, KeyCode::Tab) => {
            app.mode = Mode::Navigate;
            app.set_filter(app.filter.next());
        }

        // Clear line / delete word before cursor
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            app.entry.drain(..app.entry_cursor);
            app.entry_cursor = 0;
        }
        (m, KeyCode::Char('w')) if m.contains(KeyModifiers::CONTROL) => {
            delete_word_before_cursor(app);
        }
        (m, KeyCode::Backspace) if m.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) => {
            delete_word_before_cursor(app);
        }
        (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => {
            app.entry_cursor = 0;
        }
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => {
            app.entry_cursor = app.entry.len();
        }

        // Word motion
        (m, KeyCode::Left) if m.contains(KeyModifiers::ALT) => {
            app.entry_cursor = word_boundary_left(&app.entry, app.entry_cursor);
        }
        (m, KeyCode::Right) if m.contains(KeyModifiers::ALT) => {
            app.entry_cursor = word_boundary_right(&app.entry, app.entry_cursor);
        }
        (m, KeyCode::Char('b')) if m.contains(KeyModifiers::ALT) => {
            app.entry_cursor = word_boundary_left(&app.entry, app.entry_cursor);
        }
        (m, KeyCode::Char('f')) if m.contains(KeyModifiers::ALT) => {
            app.entry_cursor = word_boundary_right(&app.entry, app.entry_cursor);
        }

        // Character motion
        (_, KeyCode::Left) => {
            if let Some(pos) = prev_grapheme_boundary(&app.entry, app.entry_cursor) {
                app.entry_cursor = pos;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(pos) = next_grapheme_boundary(&app.entry, app.entry_cursor) {
                app.entry_cursor = pos;
            }
        }
        (_, KeyCode::Home) => app.entry_cursor = 0,
        (_, KeyCode::End) => app.entry_cursor = app.entry.len(),

        // Deletion
        (_, KeyCode::Backspace) => {
            if let Some(pos) = prev_grapheme_boundary(&app.entry, app.entry_cursor) {
                app.entry.drain(pos..app.entry_cursor);
                app.entry_cursor = pos;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(end) = next_grapheme_boundary(&app.entry, app.entry_cursor) {
                app.entry.drain(app.entry_cursor..end);
            }
        }

        // Typing
        (m, KeyCode::Char(c)) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            app.entry.insert(app.entry_cursor, c);
            app.entry_cursor += c.len_utf8();
        }

        _ => {}
    }
}

fn delete_word_before_cursor(app: &mut App) {
    let start = word_boundary_left(&app.entry, app.entry_cursor);
    app.entry.drain(start..app.entry_cursor);
    app.entry_cursor = start;
}
