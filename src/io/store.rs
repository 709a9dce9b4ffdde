use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, warn};

use crate::io::recovery::{RecoveryCategory, RecoveryEntry, atomic_write, log_recovery};
use crate::model::task::Task;
use crate::parse::{DroppedLine, parse_tasks, serialize_tasks};

/// Error type for task file I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not remove {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The task file on disk. Every save rewrites the whole file.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all tasks. A missing file is an empty list.
    pub fn load(&self) -> Result<(Vec<Task>, Vec<DroppedLine>), StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "task file missing, starting empty");
                return Ok((Vec::new(), Vec::new()));
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let (tasks, dropped) = parse_tasks(&text);
        if !dropped.is_empty() {
            warn!(
                path = %self.path.display(),
                count = dropped.len(),
                "dropped unreadable lines from task file"
            );
            log_recovery(
                &self.path,
                RecoveryEntry {
                    timestamp: chrono::Utc::now(),
                    category: RecoveryCategory::Parser,
                    description: "dropped lines".to_string(),
                    fields: vec![(
                        "Lines".to_string(),
                        dropped
                            .iter()
                            .map(|d| d.line_number.to_string())
                            .collect::<Vec<_>>()
                            .join(", "),
                    )],
                    body: dropped
                        .iter()
                        .map(|d| d.content.as_str())
                        .collect::<Vec<_>>()
                        .join("\n"),
                },
            );
        }
        debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok((tasks, dropped))
    }

    /// Rewrite the task file with the given list.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let content = serialize_tasks(tasks);
        let result = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
                fs::create_dir_all(dir).and_then(|_| atomic_write(&self.path, content.as_bytes()))
            }
            _ => atomic_write(&self.path, content.as_bytes()),
        };

        if let Err(e) = result {
            log_recovery(
                &self.path,
                RecoveryEntry {
                    timestamp: chrono::Utc::now(),
                    category: RecoveryCategory::Write,
                    description: "task file write failed".to_string(),
                    fields: vec![("Error".to_string(), e.to_string())],
                    body: content,
                },
            );
            return Err(StoreError::Write {
                path: self.path.clone(),
                source: e,
            });
        }
        debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }

    /// Delete the task file. Returns whether a file was removed.
    pub fn remove(&self) -> Result<bool, StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Remove {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// Last modification time, if the file exists
    pub fn modified(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).and_then(|m| m.modified()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::recovery::recovery_log_path;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("tasks.txt"));
        let (tasks, dropped) = store.load().unwrap();
        assert!(tasks.is_empty());
        assert!(dropped.is_empty());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("tasks.txt"));
        let tasks = vec![
            Task::new("Buy bread", Some("22.02 14:30".into())),
            Task::new("Pay | rent", None).with_done(true),
        ];
        store.save(&tasks).unwrap();

        let on_disk = fs::read_to_string(store.path()).unwrap();
        assert_eq!(on_disk, "Buy bread|22.02 14:30|0\nPay \\| rent||1\n");

        let (loaded, _) = store.load().unwrap();
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("nested/deeper/tasks.txt"));
        store.save(&[Task::new("x", None)]).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn dropped_lines_go_to_recovery_log() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.txt");
        fs::write(&path, "ok||0\nbroken line\n").unwrap();
        let store = Store::new(&path);

        let (tasks, dropped) = store.load().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(dropped.len(), 1);

        let log = fs::read_to_string(recovery_log_path(&path)).unwrap();
        assert!(log.contains("Lines: 2"));
        assert!(log.contains("broken line"));
    }

    #[test]
    fn remove_reports_whether_file_existed() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("tasks.txt"));
        assert!(!store.remove().unwrap());
        store.save(&[Task::new("x", None)]).unwrap();
        assert!(store.modified().is_some());
        assert!(store.remove().unwrap());
        assert!(!store.path().exists());
        assert!(store.modified().is_none());
    }

    #[test]
    fn load_directory_is_read_error() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());
        assert!(matches!(store.load(), Err(StoreError::Read { .. })));
    }
}
