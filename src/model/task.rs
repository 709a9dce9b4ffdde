use serde::{Deserialize, Serialize};

/// A single to-do entry. Identity is its position in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Free-form task text
    pub text: String,
    /// Creation timestamp, already formatted for display
    pub created: Option<String>,
    /// Checkbox state
    pub done: bool,
}

impl Task {
    /// Create a new, not-done task
    pub fn new(text: impl Into<String>, created: Option<String>) -> Self {
        Task {
            text: text.into(),
            created,
            done: false,
        }
    }

    /// Builder-style helper for tests and loaders
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    /// The checkbox shown in front of the task
    pub fn checkbox(&self) -> &'static str {
        if self.done { "[x]" } else { "[ ]" }
    }
}

/// Which tasks are visible in the list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Done,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Done];

    /// Tab label
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Done => "Done",
        }
    }

    /// Stable key used on the command line and in saved UI state
    pub fn key(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Done => "done",
        }
    }

    pub fn parse_filter(s: &str) -> Option<Filter> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Filter::All),
            "active" | "todo" => Some(Filter::Active),
            "done" | "completed" => Some(Filter::Done),
            _ => None,
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.done,
            Filter::Done => task.done,
        }
    }

    pub fn next(self) -> Filter {
        match self {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Done,
            Filter::Done => Filter::All,
        }
    }

    pub fn prev(self) -> Filter {
        match self {
            Filter::All => Filter::Done,
            Filter::Active => Filter::All,
            Filter::Done => Filter::Active,
        }
    }
}
