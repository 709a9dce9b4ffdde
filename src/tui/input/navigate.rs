use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::Filter;
use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Quit
        (KeyModifiers::NONE, KeyCode::Char('q')) | (_, KeyCode::Esc) => {
            app.should_quit = true;
        }

        // Focus the entry
        (KeyModifiers::NONE, KeyCode::Char('a') | KeyCode::Char('i')) => {
            app.mode = Mode::Insert;
        }

        // Cursor movement
        (_, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => app.move_cursor(1),
        (_, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => app.move_cursor(-1),
        (_, KeyCode::PageDown) => app.move_cursor(10),
        (_, KeyCode::PageUp) => app.move_cursor(-10),
        (_, KeyCode::Home) | (KeyModifiers::NONE, KeyCode::Char('g')) => app.cursor_to_top(),
        (_, KeyCode::End) | (KeyModifiers::SHIFT | KeyModifiers::NONE, KeyCode::Char('G')) => {
            app.cursor_to_bottom()
        }

        // Toggle; Enter on an empty view goes to the entry instead
        (KeyModifiers::NONE, KeyCode::Char(' ') | KeyCode::Char('x')) => app.toggle_selected(),
        (_, KeyCode::Enter) => {
            if app.selected_index().is_some() {
                app.toggle_selected();
            } else {
                app.mode = Mode::Insert;
            }
        }

        // Filter tabs
        (KeyModifiers::NONE, KeyCode::Tab) => app.set_filter(app.filter.next()),
        (_, KeyCode::BackTab) => app.set_filter(app.filter.prev()),
        (KeyModifiers::NONE, KeyCode::Char('1')) => app.set_filter(Filter::All),
        (KeyModifiers::NONE, KeyCode::Char('2')) => app.set_filter(Filter::Active),
        (KeyModifiers::NONE, KeyCode::Char('3')) => app.set_filter(Filter::Done),

        // Delete one / clear all
        (KeyModifiers::NONE, KeyCode::Char('d')) | (_, KeyCode::Delete) => app.delete_selected(),
        (KeyModifiers::SHIFT | KeyModifiers::NONE, KeyCode::Char('C')) => app.arm_clear(),

        (_, KeyCode::Char('?')) => app.show_help = true,

        _ => {}
    }
}
