use std::fmt::Write;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::io::store::{Store, StoreError};
use crate::model::config::{Config, DEFAULT_TIMESTAMP_FORMAT};
use crate::model::task::{Filter, Task};
use crate::notifier::{Notification, Notifier};
use crate::ops::task_ops::{self, OpError, TaskStats};

/// Error type for session mutations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Op(#[from] OpError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Settings a session takes from the config
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub timestamp_format: String,
    pub notify_timeout_secs: u32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            notify_timeout_secs: 2,
        }
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        SessionOptions {
            timestamp_format: config.ui.timestamp_format.clone(),
            notify_timeout_secs: config.notify.timeout_secs,
        }
    }
}

/// The task list bound to its file and notifier.
///
/// Every mutation updates the list, notifies, and rewrites the file. The
/// in-memory list stays authoritative when a write fails; the error is
/// returned so the caller can report it.
pub struct Session {
    tasks: Vec<Task>,
    store: Store,
    notifier: Box<dyn Notifier>,
    options: SessionOptions,
    /// mtime of the file right after our last write or read
    last_seen: Option<SystemTime>,
}

impl Session {
    /// Load the task file and build a session. Loading never notifies.
    pub fn open(
        store: Store,
        notifier: Box<dyn Notifier>,
        options: SessionOptions,
    ) -> Result<Self, StoreError> {
        let (tasks, _dropped) = store.load()?;
        let last_seen = store.modified();
        Ok(Session {
            tasks,
            store,
            notifier,
            options,
            last_seen,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn stats(&self) -> TaskStats {
        task_ops::stats(&self.tasks)
    }

    pub fn visible_indices(&self, filter: Filter) -> Vec<usize> {
        task_ops::visible_indices(&self.tasks, filter)
    }

    /// Add a task stamped with the current local time.
    pub fn add(&mut self, text: &str) -> Result<usize, SessionError> {
        self.add_at(text, Local::now())
    }

    /// Add a task stamped with `now`.
    pub fn add_at(&mut self, text: &str, now: DateTime<Local>) -> Result<usize, SessionError> {
        let created = self.stamp(now);
        let index = task_ops::add_task(&mut self.tasks, text, created)?;
        info!(position = index + 1, "task added");
        self.notifier.notify(&Notification::task_added(
            &self.tasks[index].text,
            self.options.notify_timeout_secs,
        ));
        self.persist()?;
        Ok(index)
    }

    /// Format `now` with the configured format. A format chrono rejects falls
    /// back to the default; an empty result means no timestamp.
    fn stamp(&self, now: DateTime<Local>) -> Option<String> {
        let mut out = String::new();
        if write!(out, "{}", now.format(&self.options.timestamp_format)).is_err() {
            warn!(
                format = %self.options.timestamp_format,
                "invalid timestamp format, using the default"
            );
            out.clear();
            let _ = write!(out, "{}", now.format(DEFAULT_TIMESTAMP_FORMAT));
        }
        if out.is_empty() { None } else { Some(out) }
    }

    /// Flip a task's status. Notifies when the task became done.
    pub fn toggle(&mut self, index: usize) -> Result<bool, SessionError> {
        let done = task_ops::toggle_task(&mut self.tasks, index)?;
        self.after_status_change(index, done)?;
        Ok(done)
    }

    /// Set a task's status. Returns whether it changed; unchanged tasks are not rewritten.
    pub fn set_done(&mut self, index: usize, done: bool) -> Result<bool, SessionError> {
        let changed = task_ops::set_done(&mut self.tasks, index, done)?;
        if changed {
            self.after_status_change(index, done)?;
        }
        Ok(changed)
    }

    fn after_status_change(&mut self, index: usize, done: bool) -> Result<(), SessionError> {
        debug!(position = index + 1, done, "task status changed");
        if done {
            self.notifier.notify(&Notification::task_completed(
                &self.tasks[index].text,
                self.options.notify_timeout_secs,
            ));
        }
        self.persist()
    }

    pub fn remove(&mut self, index: usize) -> Result<Task, SessionError> {
        let task = task_ops::remove_task(&mut self.tasks, index)?;
        info!(position = index + 1, "task removed");
        self.persist()?;
        Ok(task)
    }

    /// Remove every task and delete the task file. Returns how many were removed.
    pub fn clear(&mut self) -> Result<usize, SessionError> {
        let count = task_ops::clear_tasks(&mut self.tasks);
        self.store.remove()?;
        self.last_seen = None;
        info!(count, "cleared all tasks");
        Ok(count)
    }

    /// Re-read the file if someone else changed it since we last touched it.
    /// Returns whether the list was reloaded.
    pub fn reload_if_changed(&mut self) -> Result<bool, StoreError> {
        let current = self.store.modified();
        if current == self.last_seen {
            return Ok(false);
        }
        let (tasks, _dropped) = self.store.load()?;
        self.tasks = tasks;
        self.last_seen = current;
        info!(count = self.tasks.len(), "reloaded tasks changed on disk");
        Ok(true)
    }

    fn persist(&mut self) -> Result<(), SessionError> {
        self.store.save(&self.tasks)?;
        self.last_seen = self.store.modified();
        Ok(())
    }
}
