//! Reply formatting (color or plain).

use crate::domain::task::Task;
use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Color,
    Plain,
}

impl OutputFormat {
    pub fn from_flags(no_color: bool, config_color: bool) -> Self {
        if no_color || !config_color || std::env::var("NO_COLOR").is_ok() {
            Self::Plain
        } else {
            Self::Color
        }
    }
}

/// Renders tasks and replies with a fixed date format and output style.
#[derive(Debug, Clone)]
pub struct Renderer {
    date_format: String,
    format: OutputFormat,
}

impl Renderer {
    pub fn new(date_format: impl Into<String>, format: OutputFormat) -> Self {
        Self {
            date_format: date_format.into(),
            format,
        }
    }

    /// Default date format, no color.
    #[cfg(test)]
    pub fn plain() -> Self {
        Self::new(
            crate::domain::datetime::DEFAULT_DISPLAY_FORMAT,
            OutputFormat::Plain,
        )
    }

    pub fn task(&self, task: &Task) -> String {
        let line = task.describe(&self.date_format);
        if self.format == OutputFormat::Color && task.done {
            line.dimmed().to_string()
        } else {
            line
        }
    }

    pub fn heading(&self, text: &str) -> String {
        match self.format {
            OutputFormat::Color => text.bold().to_string(),
            OutputFormat::Plain => text.to_string(),
        }
    }

    /// A heading followed by `N. <task>` lines, numbered from 1.
    pub fn numbered<'a>(&self, heading: &str, tasks: impl IntoIterator<Item = &'a Task>) -> String {
        let mut lines = vec![self.heading(heading)];
        for (i, task) in tasks.into_iter().enumerate() {
            lines.push(format!("{}. {}", i + 1, self.task(task)));
        }
        lines.join("\n")
    }

    /// A message explaining why a command was not carried out.
    pub fn rejection(&self, message: &str) -> String {
        match self.format {
            OutputFormat::Color => message.yellow().to_string(),
            OutputFormat::Plain => message.to_string(),
        }
    }
}

/// `1 task`, `3 tasks`.
pub fn task_count(count: usize) -> String {
    if count == 1 {
        "1 task".to_string()
    } else {
        format!("{count} tasks")
    }
}
