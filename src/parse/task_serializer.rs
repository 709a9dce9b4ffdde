use crate::model::task::Task;

/// Field separator in the task file
pub const FIELD_SEP: char = '|';
/// Escape character for separators, newlines and itself
pub const ESCAPE: char = '\\';

/// Serialize tasks into the task file format, one line per task:
/// `text|created|status` with `status` being `1` (done) or `0`.
pub fn serialize_tasks(tasks: &[Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        out.push_str(&serialize_task(task));
        out.push('\n');
    }
    out
}

/// Serialize a single task line (without the trailing newline)
pub fn serialize_task(task: &Task) -> String {
    format!(
        "{}{sep}{}{sep}{}",
        escape_field(&task.text),
        escape_field(task.created.as_deref().unwrap_or("")),
        if task.done { '1' } else { '0' },
        sep = FIELD_SEP,
    )
}

/// Escape a field so it can never be split or broken across lines
pub fn escape_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            ESCAPE => out.push_str("\\\\"),
            FIELD_SEP => out.push_str("\\|"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}
