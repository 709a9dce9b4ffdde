use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, warn};

use crate::cli::handlers::Context;
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::io::watcher::TaskFileWatcher;
use crate::model::Filter;
use crate::ops::session::{Session, SessionError};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving through the list
    Navigate,
    /// Typing into the entry
    Insert,
    /// Clear-all armed, waiting for y/n
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Transient message in the status row, cleared on the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// Main application state
pub struct App {
    pub session: Session,
    pub filter: Filter,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_timestamps: bool,
    /// Cursor index into the visible (filtered) list
    pub cursor: usize,
    /// First visible row of the list
    pub scroll_offset: usize,
    /// Entry text being typed
    pub entry: String,
    /// Byte offset of the entry cursor (always on a grapheme boundary)
    pub entry_cursor: usize,
    pub status: Option<StatusMessage>,
    pub show_help: bool,
}

impl App {
    pub fn new(session: Session, theme: Theme) -> Self {
        let mode = if session.tasks().is_empty() {
            Mode::Insert
        } else {
            Mode::Navigate
        };
        App {
            session,
            filter: Filter::All,
            mode,
            should_quit: false,
            theme,
            show_timestamps: true,
            cursor: 0,
            scroll_offset: 0,
            entry: String::new(),
            entry_cursor: 0,
            status: None,
            show_help: false,
        }
    }

    /// Indices of the tasks shown under the current filter
    pub fn visible(&self) -> Vec<usize> {
        self.session.visible_indices(self.filter)
    }

    /// Index into the task list of the task under the cursor
    pub fn selected_index(&self) -> Option<usize> {
        self.visible().get(self.cursor).copied()
    }

    /// Keep the cursor inside the visible list
    pub fn clamp_cursor(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.visible().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let target = self.cursor as isize + delta;
        self.cursor = target.clamp(0, len as isize - 1) as usize;
    }

    pub fn cursor_to_top(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_to_bottom(&mut self) {
        self.cursor = self.visible().len().saturating_sub(1);
    }

    /// Switch filter tab, keeping the selected task under the cursor when it stays visible
    pub fn set_filter(&mut self, filter: Filter) {
        let selected = self.selected_index();
        self.filter = filter;
        let visible = self.visible();
        self.cursor = selected
            .and_then(|idx| visible.iter().position(|&i| i == idx))
            .unwrap_or(0);
        self.clamp_cursor();
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind: StatusKind::Info,
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind: StatusKind::Error,
        });
    }

    /// Add the entry text as a new task. Blank entries are ignored.
    pub fn submit_entry(&mut self) {
        if self.entry.trim().is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.entry);
        self.entry_cursor = 0;
        match self.session.add(&text) {
            Ok(index) => {
                self.info(format!("Added: {}", self.session.tasks()[index].text));
                self.select_task(index);
            }
            Err(e) => self.report_error(e),
        }
    }

    /// Put the cursor on `index`; falls back to All when the filter hides it
    fn select_task(&mut self, index: usize) {
        if let Some(pos) = self.visible().iter().position(|&i| i == index) {
            self.cursor = pos;
            return;
        }
        self.filter = Filter::All;
        self.cursor = self.visible().iter().position(|&i| i == index).unwrap_or(0);
    }

    pub fn toggle_selected(&mut self) {
        let Some(index) = self.selected_index() else {
            return;
        };
        match self.session.toggle(index) {
            Ok(true) => {
                let text = self.session.tasks()[index].text.clone();
                self.info(format!("Completed: {}", text));
            }
            Ok(false) => {}
            Err(e) => self.report_error(e),
        }
        // The toggled task may have left the filtered view
        self.clamp_cursor();
    }

    pub fn delete_selected(&mut self) {
        let Some(index) = self.selected_index() else {
            return;
        };
        match self.session.remove(index) {
            Ok(task) => self.info(format!("Removed: {}", task.text)),
            Err(e) => self.report_error(e),
        }
        self.clamp_cursor();
    }

    /// First step of clear-all
    pub fn arm_clear(&mut self) {
        if self.session.tasks().is_empty() {
            self.info("Nothing to clear");
            return;
        }
        self.mode = Mode::Confirm;
    }

    pub fn confirm_clear(&mut self) {
        self.mode = Mode::Navigate;
        match self.session.clear() {
            Ok(count) => self.info(format!("Cleared {} task(s)", count)),
            Err(e) => self.report_error(e),
        }
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    pub fn cancel_clear(&mut self) {
        self.mode = Mode::Navigate;
    }

    /// Pick up changes made to the task file by another process
    pub fn reload_from_disk(&mut self) {
        match self.session.reload_if_changed() {
            Ok(true) => {
                self.clamp_cursor();
                self.info("Reloaded: task file changed on disk");
            }
            Ok(false) => {}
            Err(e) => self.error(e.to_string()),
        }
    }

    fn report_error(&mut self, e: SessionError) {
        warn!(error = %e, "task update failed");
        self.error(e.to_string());
    }
}

/// Restore filter and cursor from the state file
pub fn restore_ui_state(app: &mut App) {
    let Some(state) = read_ui_state(app.session.store().path()) else {
        return;
    };
    app.filter = state.filter;
    app.cursor = state.cursor;
    app.clamp_cursor();
}

/// Save filter and cursor next to the task file
pub fn save_ui_state(app: &App) {
    let state = UiState {
        filter: app.filter,
        cursor: app.cursor,
    };
    if let Err(e) = write_ui_state(app.session.store().path(), &state) {
        debug!(error = %e, "could not save UI state");
    }
}

/// Run the TUI application
pub fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.open_session()?;
    let theme = Theme::from_config(&ctx.config.ui);
    let mut app = App::new(session, theme);
    app.show_timestamps = ctx.config.ui.show_timestamps;
    restore_ui_state(&mut app);

    // The watcher needs the directory to exist
    if let Some(dir) = ctx.task_file.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }
    let watcher = match TaskFileWatcher::start(&ctx.task_file) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!(error = %e, "file watcher unavailable, external edits won't be picked up");
            None
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&TaskFileWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if watcher.is_some_and(|w| w.poll_changed()) {
            app.reload_from_disk();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
