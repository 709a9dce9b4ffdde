use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, StatusKind};
use crate::util::unicode::{display_width, truncate_to_width};

pub const CLEAR_LABEL: &str = "[ Clear all ]";
pub const CONFIRM_LABEL: &str = "[ Really delete? (y/n) ]";

/// Render the bottom row: clear-all action on the left, status or key hints on the right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (label, label_style) = if app.mode == Mode::Confirm {
        (
            CONFIRM_LABEL,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.danger_armed)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            CLEAR_LABEL,
            Style::default().fg(app.theme.text_bright).bg(app.theme.danger),
        )
    };

    let mut spans = vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(label, label_style),
    ];
    let used = 1 + display_width(label);

    let (right, right_style) = match &app.status {
        Some(msg) => {
            let fg = match msg.kind {
                StatusKind::Info => app.theme.green,
                StatusKind::Error => app.theme.red,
            };
            (msg.text.clone(), Style::default().fg(fg).bg(bg))
        }
        None => (
            hint_for(app.mode).to_string(),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    };

    // Right-align, truncating when the row is too narrow
    let room = width.saturating_sub(used + 2);
    let right = truncate_to_width(&right, room);
    let pad = width.saturating_sub(used + display_width(&right) + 1);
    spans.push(Span::styled(" ".repeat(pad), Style::default().bg(bg)));
    spans.push(Span::styled(right, right_style));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

fn hint_for(mode: Mode) -> &'static str {
    match mode {
        Mode::Navigate => "a add  space toggle  d delete  tab filter  ? help  q quit",
        Mode::Insert => "Enter add  Esc list",
        Mode::Confirm => "y clear everything  any other key cancels",
    }
}
