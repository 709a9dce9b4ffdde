use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::Task;
use crate::tui::app::{App, Mode};
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the bordered task list for the current filter
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Tasks ",
            Style::default().fg(app.theme.text).bg(bg),
        ))
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let visible = app.visible();
    if visible.is_empty() {
        let msg = if app.session.tasks().is_empty() {
            "Nothing to do yet"
        } else {
            "No tasks match this filter"
        };
        let line = Line::from(Span::styled(
            format!(" {}", msg),
            Style::default()
                .fg(app.theme.dim)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        ));
        frame.render_widget(Paragraph::new(line), inner);
        return;
    }

    let height = inner.height as usize;
    app.scroll_offset = adjust_scroll(app.scroll_offset, app.cursor, height, visible.len());

    let show_cursor = app.mode != Mode::Insert;
    let lines: Vec<Line> = visible
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
        .filter_map(|(row, &idx)| {
            let task = app.session.task(idx)?;
            let selected = show_cursor && row == app.cursor;
            Some(task_line(app, task, selected, inner.width as usize))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Keep `cursor` inside the window of `height` rows starting at `offset`
fn adjust_scroll(offset: usize, cursor: usize, height: usize, len: usize) -> usize {
    if height == 0 {
        return 0;
    }
    let mut offset = offset.min(len.saturating_sub(height));
    if cursor < offset {
        offset = cursor;
    } else if cursor >= offset + height {
        offset = cursor + 1 - height;
    }
    offset
}

fn task_line<'a>(app: &App, task: &'a Task, selected: bool, width: usize) -> Line<'a> {
    let bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let pointer = if selected { "\u{25B8} " } else { "  " };
    let check_color = if task.done {
        app.theme.green
    } else {
        app.theme.text
    };
    let mut text_style = Style::default().fg(app.theme.task_color(task.done)).bg(bg);
    if task.done {
        text_style = text_style.add_modifier(Modifier::CROSSED_OUT);
    }
    if selected {
        text_style = text_style.add_modifier(Modifier::BOLD);
    }

    let created = match (&task.created, app.show_timestamps) {
        (Some(ts), true) if !ts.is_empty() => Some(format!("  Created: {}", ts)),
        _ => None,
    };

    let prefix_w = display_width(pointer) + display_width(task.checkbox()) + 1;
    let created_w = created.as_deref().map_or(0, display_width);
    let text_room = width.saturating_sub(prefix_w + created_w);
    let text = truncate_to_width(&task.text, text_room);
    let used = prefix_w + display_width(&text) + created_w;

    let mut spans = vec![
        Span::styled(pointer, Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(task.checkbox(), Style::default().fg(check_color).bg(bg)),
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(text, text_style),
    ];
    if let Some(created) = created {
        spans.push(Span::styled(
            created,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }
    // Fill the rest of the row so the selection highlight spans the full width
    if selected && used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
    }
    Line::from(spans)
}
