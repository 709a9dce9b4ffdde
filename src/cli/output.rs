use serde::Serialize;

use crate::model::task::{Filter, Task};
use crate::ops::task_ops::TaskStats;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    /// 1-based position in the list
    pub position: usize,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    pub done: bool,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub filter: Filter,
    pub tasks: Vec<TaskJson>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(index: usize, task: &Task) -> TaskJson {
    TaskJson {
        position: index + 1,
        text: task.text.clone(),
        created: task.created.clone(),
        done: task.done,
    }
}

pub fn list_to_json(tasks: &[Task], indices: &[usize], filter: Filter) -> TaskListJson {
    TaskListJson {
        filter,
        tasks: indices.iter().map(|&i| task_to_json(i, &tasks[i])).collect(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single task as a one-line summary: `  3. [x] Text  (22.02 14:30)`
pub fn format_task_line(index: usize, task: &Task, position_width: usize) -> String {
    let created = task
        .created
        .as_ref()
        .map(|c| format!("  ({})", c))
        .unwrap_or_default();
    // Keep multi-line text on one output line
    let text = task.text.replace('\n', " ");
    format!(
        "{:>width$}. {} {}{}",
        index + 1,
        task.checkbox(),
        text,
        created,
        width = position_width
    )
}

/// Format the visible tasks, one per line, positions right-aligned
pub fn format_listing(tasks: &[Task], indices: &[usize]) -> Vec<String> {
    let width = tasks.len().max(1).to_string().len();
    indices
        .iter()
        .map(|&i| format_task_line(i, &tasks[i], width))
        .collect()
}

pub fn format_stats(stats: &TaskStats) -> String {
    format!(
        "{} tasks: {} active, {} done",
        stats.total, stats.active, stats.done
    )
}

/// Parse a filter name
pub fn parse_filter(s: &str) -> Result<Filter, String> {
    Filter::parse_filter(s).ok_or_else(|| {
        format!("unknown filter '{}' (expected: all, active, done)", s)
    })
}
