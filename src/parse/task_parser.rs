use crate::model::task::Task;
use crate::parse::task_serializer::{ESCAPE, FIELD_SEP};

/// A line that could not be turned into a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedLine {
    /// 1-based line number in the source
    pub line_number: usize,
    pub content: String,
}

/// Parse a task file.
///
/// Accepts the current three-field format `text|created|status` and the older
/// two-field format `text|status`. Blank lines are skipped. Lines with any other
/// field count are returned as dropped instead of being guessed at.
pub fn parse_tasks(source: &str) -> (Vec<Task>, Vec<DroppedLine>) {
    let mut tasks = Vec::new();
    let mut dropped = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match parse_task_line(line) {
            Some(task) => tasks.push(task),
            None => dropped.push(DroppedLine {
                line_number: idx + 1,
                content: raw.to_string(),
            }),
        }
    }

    (tasks, dropped)
}

/// Parse a single (already trimmed) task line
pub fn parse_task_line(line: &str) -> Option<Task> {
    let fields = split_fields(line);
    match fields.as_slice() {
        [text, created, status] => Some(Task {
            text: text.clone(),
            created: if created.is_empty() {
                None
            } else {
                Some(created.clone())
            },
            done: parse_status(status),
        }),
        [text, status] => Some(Task {
            text: text.clone(),
            created: None,
            done: parse_status(status),
        }),
        _ => None,
    }
}

/// `1` means done; anything else is treated as not done.
fn parse_status(field: &str) -> bool {
    field.trim() == "1"
}

/// Split on unescaped separators and unescape each field.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        if c == ESCAPE {
            match chars.next() {
                Some('n') => current.push('\n'),
                Some('r') => current.push('\r'),
                Some(other) => current.push(other),
                // Lone trailing backslash stays literal
                None => current.push(ESCAPE),
            }
        } else if c == FIELD_SEP {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::serialize_tasks;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_three_field_lines() {
        let (tasks, dropped) = parse_tasks("Buy bread|22.02 14:30|0\nWash the cat||1\n");
        assert!(dropped.is_empty());
        assert_eq!(
            tasks,
            vec![
                Task::new("Buy bread", Some("22.02 14:30".into())),
                Task::new("Wash the cat", None).with_done(true),
            ]
        );
    }

    #[test]
    fn parse_legacy_two_field_lines() {
        let (tasks, dropped) = parse_tasks("Old task|1\nOther|0\n");
        assert!(dropped.is_empty());
        assert_eq!(tasks.len(), 2);
        assert!(tasks[0].done);
        assert_eq!(tasks[0].created, None);
        assert!(!tasks[1].done);
    }

    #[test]
    fn parse_skips_blank_lines_and_crlf() {
        let (tasks, dropped) = parse_tasks("\r\nA||0\r\n\n   \nB||1\r\n");
        assert!(dropped.is_empty());
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].text, "A");
        assert_eq!(tasks[1].text, "B");
    }

    #[test]
    fn parse_drops_malformed_lines_with_line_numbers() {
        let (tasks, dropped) = parse_tasks("good||0\njust text\na|b|c|d\n");
        assert_eq!(tasks.len(), 1);
        assert_eq!(
            dropped,
            vec![
                DroppedLine {
                    line_number: 2,
                    content: "just text".into()
                },
                DroppedLine {
                    line_number: 3,
                    content: "a|b|c|d".into()
                },
            ]
        );
    }

    #[test]
    fn parse_unknown_status_is_not_done() {
        let (tasks, _) = parse_tasks("x||yes\ny||1\n");
        assert!(!tasks[0].done);
        assert!(tasks[1].done);
    }

    #[test]
    fn escaped_separator_stays_in_text() {
        let (tasks, dropped) = parse_tasks("a\\|b||0\n");
        assert!(dropped.is_empty());
        assert_eq!(tasks[0].text, "a|b");
    }

    #[test]
    fn unknown_escape_and_trailing_backslash() {
        assert_eq!(split_fields(r"a\qb"), vec!["aqb"]);
        assert_eq!(split_fields("end\\"), vec!["end\\"]);
    }

    #[test]
    fn pipe_in_text_round_trips() {
        let tasks = vec![
            Task::new("fix | in parser", Some("01.03 10:00".into())),
            Task::new(r"C:\temp\|odd", None).with_done(true),
            Task::new("two\nlines", None),
        ];
        let text = serialize_tasks(&tasks);
        let (parsed, dropped) = parse_tasks(&text);
        assert!(dropped.is_empty());
        assert_eq!(parsed, tasks);
    }
}
