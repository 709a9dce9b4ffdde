use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;
use tracing::warn;

/// Self-documenting header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- taskmaster recovery log: append-only
     Lines that could not be loaded and saves that failed end up here.
     Safe to delete once you have copied back anything you need. -->

---
";

/// Category of a recovery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    /// Lines dropped while loading the task file
    Parser,
    /// Content that could not be written to the task file
    Write,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Parser => write!(f, "parser"),
            RecoveryCategory::Write => write!(f, "write"),
        }
    }
}

/// A single entry in the recovery log.
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

/// The recovery log sits next to the task file: `tasks.txt` → `tasks.txt.recovery.log`.
pub fn recovery_log_path(task_file: &Path) -> PathBuf {
    sibling_path(task_file, "recovery.log")
}

/// `dir/name.ext` + `suffix` → `dir/name.ext.suffix`
pub(crate) fn sibling_path(task_file: &Path, suffix: &str) -> PathBuf {
    let mut name = task_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "tasks".into());
    name.push(".");
    name.push(suffix);
    task_file.with_file_name(name)
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

impl RecoveryEntry {
    /// Format this entry as a markdown block for the recovery log.
    fn to_markdown(&self) -> String {
        let mut out = format!(
            "## {} {}: {}\n\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        );

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            out.push_str("\n```text\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }

        out.push_str("\n---\n");
        out
    }
}

/// Append a recovery entry to the log next to `task_file`. Errors are swallowed.
pub fn log_recovery(task_file: &Path, entry: RecoveryEntry) {
    let path = recovery_log_path(task_file);
    if let Err(e) = append_entry(&path, &entry) {
        warn!(path = %path.display(), error = %e, "could not write to recovery log");
    }
}

fn append_entry(path: &Path, entry: &RecoveryEntry) -> io::Result<()> {
    let needs_header = std::fs::metadata(path).map_or(true, |m| m.len() == 0);
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(category: RecoveryCategory, body: &str) -> RecoveryEntry {
        RecoveryEntry {
            timestamp: Utc::now(),
            category,
            description: "dropped lines".into(),
            fields: vec![("Source".into(), "tasks.txt".into())],
            body: body.into(),
        }
    }

    #[test]
    fn log_path_is_sibling_of_task_file() {
        assert_eq!(
            recovery_log_path(Path::new("/data/tasks.txt")),
            PathBuf::from("/data/tasks.txt.recovery.log")
        );
    }

    #[test]
    fn atomic_write_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.txt");
        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn header_written_once() {
        let dir = TempDir::new().unwrap();
        let task_file = dir.path().join("tasks.txt");
        log_recovery(&task_file, entry(RecoveryCategory::Parser, "a|b|c|d"));
        log_recovery(&task_file, entry(RecoveryCategory::Write, "x||0\n"));

        let log = std::fs::read_to_string(recovery_log_path(&task_file)).unwrap();
        assert_eq!(log.matches("taskmaster recovery log").count(), 1);
        assert!(log.contains("parser: dropped lines"));
        assert!(log.contains("write: dropped lines"));
        assert!(log.contains("Source: tasks.txt"));
        assert!(log.contains("```text\na|b|c|d\n```"));
    }

    #[test]
    fn unwritable_log_is_swallowed() {
        let dir = TempDir::new().unwrap();
        let task_file = dir.path().join("missing-dir").join("tasks.txt");
        log_recovery(&task_file, entry(RecoveryCategory::Parser, "x"));
        assert!(!recovery_log_path(&task_file).exists());
    }
}
