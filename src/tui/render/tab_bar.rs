use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Filter;
use crate::tui::app::App;

/// Render the filter tabs with per-filter counts: `All 3 │ Active 2 │ Done 1`
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let stats = app.session.stats();
    let sep = Span::styled(" \u{2502} ", Style::default().fg(app.theme.dim).bg(bg));

    let mut spans: Vec<Span> = vec![Span::styled(" ", Style::default().bg(bg))];
    for (i, filter) in Filter::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(sep.clone());
        }
        let current = *filter == app.filter;
        spans.push(Span::styled(
            format!(" {} {} ", filter.label(), stats.count(*filter)),
            tab_style(app, current),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

fn tab_style(app: &App, current: bool) -> Style {
    if current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim).bg(app.theme.background)
    }
}
