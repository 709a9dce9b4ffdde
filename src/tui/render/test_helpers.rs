use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::io::store::Store;
use crate::model::Task;
use crate::notifier::NullNotifier;
use crate::ops::session::{Session, SessionOptions};
use crate::parse::serialize_tasks;
use crate::tui::app::App;
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// (text, created, done)
pub type TaskRow<'a> = (&'a str, Option<&'a str>, bool);

pub const SAMPLE_TASKS: &[TaskRow<'static>] = &[
    ("Buy bread", Some("22.02 14:30"), false),
    ("Wash the cat", Some("22.02 15:05"), true),
    ("Call mom | dad", None, false),
];

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An App over a temp task file holding `tasks`. No file is written when `tasks` is empty.
pub fn app_with_tasks(tasks: &[TaskRow]) -> (App, TempDir) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.txt");
    if !tasks.is_empty() {
        let tasks: Vec<Task> = tasks
            .iter()
            .map(|(text, created, done)| {
                Task::new(*text, created.map(str::to_string)).with_done(*done)
            })
            .collect();
        std::fs::write(&path, serialize_tasks(&tasks)).unwrap();
    }
    let session = Session::open(
        Store::new(path),
        Box::new(NullNotifier),
        SessionOptions::default(),
    )
    .unwrap();
    (App::new(session, Theme::default()), dir)
}
