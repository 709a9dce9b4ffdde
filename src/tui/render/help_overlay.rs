use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(60, 80, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(" Key Bindings", header_style)),
        Line::from(""),
        Line::from(Span::styled(" List", header_style)),
    ];
    for (keys, desc) in [
        (" \u{2191}\u{2193}/jk", "Move cursor"),
        (" g/G", "First / last task"),
        (" Space/x/Enter", "Toggle done"),
        (" d/Del", "Delete task"),
        (" C", "Clear all (asks first)"),
        (" Tab/S-Tab", "Next / previous filter"),
        (" 1 2 3", "All / Active / Done"),
        (" a/i", "Focus the entry"),
        (" q/Esc", "Quit"),
    ] {
        add_binding(&mut lines, keys, desc, key_style, desc_style);
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Entry", header_style)));
    for (keys, desc) in [
        (" Enter", "Add task"),
        (" Esc", "Back to the list"),
        (" Tab", "Back to the list, next filter"),
        (" Alt-\u{2190}/\u{2192}", "Word left / right"),
        (" Ctrl-W", "Delete word"),
        (" Ctrl-U", "Delete to start"),
    ] {
        add_binding(&mut lines, keys, desc, key_style, desc_style);
    }

    lines.push(Line::from(""));
    add_binding(&mut lines, " Ctrl-C", "Quit from anywhere", key_style, desc_style);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage size
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
