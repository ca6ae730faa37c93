//! Task record and its three kinds.

use crate::domain::datetime::DEFAULT_DISPLAY_FORMAT;
use crate::error::TaskBotError;
use chrono::NaiveDateTime;
use std::fmt;

/// The per-kind payload of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Todo,
    Deadline {
        due: NaiveDateTime,
    },
    Event {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl TaskKind {
    /// Single-letter code used in the task file and listings.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Todo => "T",
            Self::Deadline { .. } => "D",
            Self::Event { .. } => "E",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    pub done: bool,
    pub tags: Vec<String>,
    kind: TaskKind,
}

impl Task {
    /// Rebuild a task from stored parts. No validation is applied.
    pub fn from_parts(name: String, done: bool, kind: TaskKind, tags: Vec<String>) -> Self {
        Self {
            name,
            done,
            tags,
            kind,
        }
    }

    pub fn todo(name: String) -> Self {
        Self::from_parts(name, false, TaskKind::Todo, Vec::new())
    }

    pub fn deadline(name: String, due: NaiveDateTime) -> Self {
        Self::from_parts(name, false, TaskKind::Deadline { due }, Vec::new())
    }

    /// Create an event. The end must come strictly after the start.
    pub fn event(
        name: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, TaskBotError> {
        if end <= start {
            return Err(TaskBotError::EventEndsBeforeStart);
        }
        Ok(Self::from_parts(
            name,
            false,
            TaskKind::Event { start, end },
            Vec::new(),
        ))
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Render the task with timestamps in the given strftime format.
    pub fn describe(&self, date_format: &str) -> String {
        let check = if self.done { "X" } else { " " };
        let mut out = format!("[{}][{check}] {}", self.kind.code(), self.name);

        match self.kind {
            TaskKind::Todo => {}
            TaskKind::Deadline { due } => {
                out.push_str(&format!(" (by: {})", due.format(date_format)));
            }
            TaskKind::Event { start, end } => {
                out.push_str(&format!(
                    " (from: {} to: {})",
                    start.format(date_format),
                    end.format(date_format)
                ));
            }
        }

        if !self.tags.is_empty() {
            let tags: Vec<String> = self.tags.iter().map(|t| format!("#{t}")).collect();
            out.push_str(" - ");
            out.push_str(&tags.join(" "));
        }
        out
    }

    /// Whole-word, case-insensitive match against the task name.
    pub fn name_has_word(&self, keyword: &str) -> bool {
        self.name
            .split(' ')
            .any(|word| word.to_lowercase() == keyword.to_lowercase())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(DEFAULT_DISPLAY_FORMAT))
    }
}
