use std::ffi::OsString;
use std::path::Path;
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Events sent from the file watcher to the TUI event loop.
#[derive(Debug, PartialEq, Eq)]
pub enum FileEvent {
    /// The task file was created, modified, replaced or removed.
    Changed,
}

/// Watches the directory holding the task file and reports changes to that file only.
pub struct TaskFileWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<FileEvent>,
}

impl TaskFileWatcher {
    /// Start watching `task_file`. Its parent directory must exist.
    pub fn start(task_file: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let file_name: OsString = task_file
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        let dir = match task_file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        };

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                // Temp files from atomic writes and the sidecar logs share the
                // directory; only the task file itself counts.
                if event
                    .paths
                    .iter()
                    .any(|p| p.file_name() == Some(file_name.as_os_str()))
                {
                    let _ = tx.send(FileEvent::Changed);
                }
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        Ok(TaskFileWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll. True if the task file changed since the last poll.
    pub fn poll_changed(&self) -> bool {
        let mut changed = false;
        while let Ok(FileEvent::Changed) = self.rx.try_recv() {
            changed = true;
        }
        changed
    }
}
