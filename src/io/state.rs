use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::io::recovery::sibling_path;
use crate::model::task::Filter;

/// Persisted TUI state (written next to the task file as `<file>.state.json`)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UiState {
    /// Last selected filter tab
    #[serde(default)]
    pub filter: Filter,
    /// Cursor position within the visible list
    #[serde(default)]
    pub cursor: usize,
}

pub fn ui_state_path(task_file: &Path) -> PathBuf {
    sibling_path(task_file, "state.json")
}

/// Read saved UI state. Missing or malformed files give `None`.
pub fn read_ui_state(task_file: &Path) -> Option<UiState> {
    let content = fs::read_to_string(ui_state_path(task_file)).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write UI state next to the task file
pub fn write_ui_state(task_file: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let content = serde_json::to_string_pretty(state)?;
    fs::write(ui_state_path(task_file), content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let task_file = dir.path().join("tasks.txt");
        let state = UiState {
            filter: Filter::Done,
            cursor: 3,
        };
        write_ui_state(&task_file, &state).unwrap();
        assert_eq!(read_ui_state(&task_file), Some(state));
    }

    #[test]
    fn read_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_ui_state(&dir.path().join("tasks.txt")).is_none());
    }

    #[test]
    fn read_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        let task_file = dir.path().join("tasks.txt");
        fs::write(ui_state_path(&task_file), "not json {{{").unwrap();
        assert!(read_ui_state(&task_file).is_none());
    }

    #[test]
    fn serde_defaults_on_empty_object() {
        let state: UiState = serde_json::from_str("{}").unwrap();
        assert_eq!(state.filter, Filter::All);
        assert_eq!(state.cursor, 0);
    }
}
