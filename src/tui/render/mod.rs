pub mod entry;
pub mod help_overlay;
pub mod status_row;
pub mod tab_bar;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::App;

pub const TITLE: &str = "Task Master";

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title | entry (bordered) | task list | filter tabs | clear action + status
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(3), // entry box
            Constraint::Min(3),    // task list
            Constraint::Length(1), // filter tabs
            Constraint::Length(1), // status row
        ])
        .split(area);

    render_title(frame, app, chunks[0]);
    entry::render_entry(frame, app, chunks[1]);
    task_list::render_task_list(frame, app, chunks[2]);
    tab_bar::render_tab_bar(frame, app, chunks[3]);
    status_row::render_status_row(frame, app, chunks[4]);

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let line = Line::from(vec![
        Span::styled(" \u{2713} ", Style::default().fg(app.theme.purple).bg(bg)),
        Span::styled(
            TITLE,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn full_screen_layout() {
        let (mut app, _dir) = app_with_tasks(SAMPLE_TASKS);
        let output = render_to_string(TERM_W, TERM_H, |frame, _area| {
            render(frame, &mut app);
        });
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].contains(TITLE));
        assert!(output.contains(entry::PLACEHOLDER));
        assert!(output.contains("Buy bread"));
        assert!(output.contains("Active 2"));
        assert!(output.contains(status_row::CLEAR_LABEL));
    }

    #[test]
    fn help_overlay_on_top() {
        let (mut app, _dir) = app_with_tasks(SAMPLE_TASKS);
        app.show_help = true;
        let output = render_to_string(TERM_W, TERM_H, |frame, _area| {
            render(frame, &mut app);
        });
        assert!(output.contains("Key Bindings"));
    }

    #[test]
    fn cursor_shown_only_while_typing() {
        let (mut app, _dir) = app_with_tasks(&[]);
        app.entry = "ab".into();
        app.entry_cursor = 2;
        let mut terminal = Terminal::new(TestBackend::new(TERM_W, TERM_H)).unwrap();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();
        // Title row, then the entry border; text starts one cell in from the border
        assert_eq!(
            terminal.get_cursor_position().unwrap(),
            ratatui::layout::Position::new(4, 2)
        );
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let (mut app, _dir) = app_with_tasks(SAMPLE_TASKS);
        let _ = render_to_string(10, 4, |frame, _area| {
            render(frame, &mut app);
        });
    }
}
