//! Error types for taskbot.

use thiserror::Error;

/// All error types that can occur in taskbot.
///
/// User errors are rendered back to the user as a reply; the rest abort the
/// current operation.
#[derive(Error, Debug)]
pub enum TaskBotError {
    // User errors (rendered as replies)
    /// The task number could not be read as an integer.
    #[error("Invalid Command!")]
    InvalidCommand,

    /// No task exists at the given 1-based number.
    #[error("There is no task at task number '{0}'")]
    NoSuchTask(i64),

    /// A command was given too few or too many arguments.
    #[error("{0}")]
    MissingArgument(&'static str),

    /// A task command came without a name.
    #[error("I require a description for your '{0}' task!")]
    MissingDescription(&'static str),

    /// `/by` was given without anything after it.
    #[error("Your deadline task needs a deadline! Please enter your task again!")]
    MissingDeadline,

    /// A marker was followed by only one of date and time.
    #[error("You need to add both DATE and TIME to your {0}! (Format: yyyy-mm-dd HH:mm)")]
    MissingDateOrTime(&'static str),

    #[error("When does your event begin? Please add it!")]
    MissingEventStart,

    #[error("What time does your event end? Please let me know!")]
    MissingEventEnd,

    /// Date or time text did not match `yyyy-mm-dd HH:mm`.
    #[error("Input dates and times not in the format 'yyyy-mm-dd HH:mm'!")]
    BadTimestamp,

    #[error("This event ends before it begins? Please check its timings!")]
    EventEndsBeforeStart,

    /// Only raised when past-start events are disallowed in the config.
    #[error("This event's start time is already in the past!")]
    EventInPast,

    #[error("You need to enter a keyword to find your tasks!")]
    MissingKeyword,

    #[error("You can only enter one keyword!")]
    TooManyKeywords,

    /// `untag` on a task that carries no tags.
    #[error("Task number '{0}' has no tags to remove!")]
    NoTags(i64),

    #[error("ERROR! Unknown Command: '{0}'")]
    UnknownCommand(String),

    #[error("Please enter a command!")]
    EmptyCommand,

    /// An invalid command-line argument was provided.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Data errors (exit code: 2)
    /// The task file could not be read or written.
    #[error("Failed to access task file: {path}")]
    Storage {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    // Config errors (exit code: 4)
    /// Failed to read or parse the configuration file.
    #[error("Failed to read configuration: {0}")]
    ConfigError(String),

    // IO errors
    /// A generic I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TaskBotError {
    /// Whether this error describes bad user input rather than a broken store.
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            Self::Storage { .. } | Self::ConfigError(_) | Self::Io(_)
        )
    }

    /// Returns the process exit code for this error category.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Storage { .. } => 2,
            Self::ConfigError(_) => 4,
            _ => 1,
        }
    }

    pub(crate) fn storage(path: &std::path::Path, source: impl Into<anyhow::Error>) -> Self {
        Self::Storage {
            path: path.display().to_string(),
            source: source.into(),
        }
    }
}
