use serde::Serialize;

use crate::model::task::{Filter, Task};

/// Error type for list operations
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum OpError {
    #[error("task text is empty")]
    EmptyText,
    /// `position` is 1-based, as shown to users
    #[error("no task at position {position}")]
    NoSuchTask { position: usize },
}

fn check_index(tasks: &[Task], index: usize) -> Result<(), OpError> {
    if index >= tasks.len() {
        return Err(OpError::NoSuchTask {
            position: index + 1,
        });
    }
    Ok(())
}

/// Append a new, not-done task. Returns its index.
pub fn add_task(tasks: &mut Vec<Task>, text: &str, created: Option<String>) -> Result<usize, OpError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(OpError::EmptyText);
    }
    tasks.push(Task::new(text, created));
    Ok(tasks.len() - 1)
}

/// Flip a task's status. Returns the new status.
pub fn toggle_task(tasks: &mut [Task], index: usize) -> Result<bool, OpError> {
    check_index(tasks, index)?;
    let task = &mut tasks[index];
    task.done = !task.done;
    Ok(task.done)
}

/// Set a task's status. Returns whether it changed.
pub fn set_done(tasks: &mut [Task], index: usize, done: bool) -> Result<bool, OpError> {
    check_index(tasks, index)?;
    let task = &mut tasks[index];
    let changed = task.done != done;
    task.done = done;
    Ok(changed)
}

/// Remove a single task, shifting later positions down by one.
pub fn remove_task(tasks: &mut Vec<Task>, index: usize) -> Result<Task, OpError> {
    check_index(tasks, index)?;
    Ok(tasks.remove(index))
}

/// Remove everything. Returns how many tasks were removed.
pub fn clear_tasks(tasks: &mut Vec<Task>) -> usize {
    let count = tasks.len();
    tasks.clear();
    count
}

/// Indices of the tasks visible under `filter`, in list order.
pub fn visible_indices(tasks: &[Task], filter: Filter) -> Vec<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| filter.matches(t))
        .map(|(i, _)| i)
        .collect()
}

/// Task counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub active: usize,
    pub done: usize,
}

impl TaskStats {
    pub fn count(self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.total,
            Filter::Active => self.active,
            Filter::Done => self.done,
        }
    }
}

pub fn stats(tasks: &[Task]) -> TaskStats {
    let done = tasks.iter().filter(|t| t.done).count();
    TaskStats {
        total: tasks.len(),
        active: tasks.len() - done,
        done,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Task> {
        vec![
            Task::new("one", None),
            Task::new("two", None).with_done(true),
            Task::new("three", None),
        ]
    }

    #[test]
    fn add_trims_and_appends() {
        let mut tasks = sample();
        let idx = add_task(&mut tasks, "  four  ", Some("01.01 10:00".into())).unwrap();
        assert_eq!(idx, 3);
        assert_eq!(tasks[3].text, "four");
        assert_eq!(tasks[3].created.as_deref(), Some("01.01 10:00"));
        assert!(!tasks[3].done);
    }

    #[test]
    fn add_rejects_blank_text() {
        let mut tasks = Vec::new();
        assert_eq!(add_task(&mut tasks, "", None), Err(OpError::EmptyText));
        assert_eq!(add_task(&mut tasks, " \t ", None), Err(OpError::EmptyText));
        assert!(tasks.is_empty());
    }

    #[test]
    fn add_keeps_pipes_in_text() {
        let mut tasks = Vec::new();
        add_task(&mut tasks, "a | b", None).unwrap();
        assert_eq!(tasks[0].text, "a | b");
    }

    #[test]
    fn toggle_flips_and_reports() {
        let mut tasks = sample();
        assert_eq!(toggle_task(&mut tasks, 0), Ok(true));
        assert_eq!(toggle_task(&mut tasks, 0), Ok(false));
        assert_eq!(
            toggle_task(&mut tasks, 9),
            Err(OpError::NoSuchTask { position: 10 })
        );
    }

    #[test]
    fn set_done_reports_change() {
        let mut tasks = sample();
        assert_eq!(set_done(&mut tasks, 1, true), Ok(false));
        assert_eq!(set_done(&mut tasks, 1, false), Ok(true));
        assert!(!tasks[1].done);
    }

    #[test]
    fn remove_shifts_positions() {
        let mut tasks = sample();
        let removed = remove_task(&mut tasks, 0).unwrap();
        assert_eq!(removed.text, "one");
        assert_eq!(tasks[0].text, "two");
        assert!(remove_task(&mut tasks, 2).is_err());
    }

    #[test]
    fn clear_returns_count() {
        let mut tasks = sample();
        assert_eq!(clear_tasks(&mut tasks), 3);
        assert!(tasks.is_empty());
        assert_eq!(clear_tasks(&mut tasks), 0);
    }

    #[test]
    fn visible_indices_by_filter() {
        let tasks = sample();
        assert_eq!(visible_indices(&tasks, Filter::All), vec![0, 1, 2]);
        assert_eq!(visible_indices(&tasks, Filter::Active), vec![0, 2]);
        assert_eq!(visible_indices(&tasks, Filter::Done), vec![1]);
        assert!(visible_indices(&[], Filter::All).is_empty());
    }

    #[test]
    fn stats_counts() {
        let s = stats(&sample());
        assert_eq!(
            s,
            TaskStats {
                total: 3,
                active: 2,
                done: 1
            }
        );
        assert_eq!(s.count(Filter::Active), 2);
        assert_eq!(s.count(Filter::Done), 1);
    }
}
