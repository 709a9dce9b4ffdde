use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Mode};
use crate::util::unicode::{byte_offset_to_display_col, display_width};

pub const PLACEHOLDER: &str = "What needs to be done?";
pub const ADD_LABEL: &str = "[ Add ]";

/// Render the entry box: text (or placeholder) on the left, the add action on the right
pub fn render_entry(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let focused = app.mode == Mode::Insert;
    let border_color = if focused {
        app.theme.highlight
    } else {
        app.theme.dim
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" New task ", Style::default().fg(border_color).bg(bg)))
        .border_style(Style::default().fg(border_color).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let inner_w = inner.width as usize;
    let add_w = display_width(ADD_LABEL);
    // One cell of padding on each side of the text
    let text_w = inner_w.saturating_sub(add_w + 2);

    // Scroll the entry horizontally so the cursor stays visible
    let cursor_col = byte_offset_to_display_col(&app.entry, app.entry_cursor);
    let h_scroll = cursor_col.saturating_sub(text_w.saturating_sub(1));
    let shown = visible_slice(&app.entry, h_scroll, text_w);

    let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];
    let shown_w = if app.entry.is_empty() {
        spans.push(Span::styled(
            PLACEHOLDER,
            Style::default()
                .fg(app.theme.dim)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        ));
        display_width(PLACEHOLDER)
    } else {
        spans.push(Span::styled(
            shown.clone(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
        display_width(&shown)
    };

    let pad = inner_w.saturating_sub(1 + shown_w + add_w);
    spans.push(Span::styled(" ".repeat(pad), Style::default().bg(bg)));
    let add_style = if focused && !app.entry.trim().is_empty() {
        Style::default()
            .fg(app.theme.background)
            .bg(app.theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(bg)
    };
    spans.push(Span::styled(ADD_LABEL, add_style));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        inner,
    );

    if focused {
        let x = inner.x + 1 + (cursor_col - h_scroll).min(text_w) as u16;
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}

/// The part of `s` between display columns `skip` and `skip + width`
fn visible_slice(s: &str, skip: usize, width: usize) -> String {
    use unicode_segmentation::UnicodeSegmentation;

    let mut col = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = display_width(g);
        if col >= skip {
            if col + w > skip + width {
                break;
            }
            out.push_str(g);
        }
        col += w;
    }
    out
}
