//! Command vocabulary and argument validation.
//!
//! A raw line is split into whitespace-separated tokens. The first token picks
//! the [`Command`] variant; the remaining tokens are checked and turned into
//! typed arguments before anything touches the task list.

use crate::domain::datetime;
use crate::error::TaskBotError;
use chrono::NaiveDateTime;

const BY_MARKER: &str = "/by";
const FROM_MARKER: &str = "/from";
const TO_MARKER: &str = "/to";

/// A fully validated command. Task numbers are 1-based as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Mark(i64),
    Unmark(i64),
    Delete(i64),
    Todo {
        name: String,
    },
    Deadline {
        name: String,
        due: NaiveDateTime,
    },
    Event {
        name: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    Find {
        keyword: String,
    },
    Tag {
        number: i64,
        text: String,
    },
    Untag(i64),
}

/// Trim and split on runs of whitespace.
pub fn tokenize(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_string).collect()
}

/// Convert a 1-based task number to a 0-based index.
pub fn to_index(number: i64) -> Option<usize> {
    if number < 1 {
        return None;
    }
    usize::try_from(number - 1).ok()
}

impl Command {
    /// Build a command from tokens. The first token is the command word.
    pub fn parse(tokens: &[String]) -> Result<Self, TaskBotError> {
        let word = tokens.first().ok_or(TaskBotError::EmptyCommand)?;

        match word.to_lowercase().as_str() {
            "list" => Ok(Self::List),
            "mark" => task_number(tokens, "mark").map(Self::Mark),
            "unmark" => task_number(tokens, "unmark").map(Self::Unmark),
            "delete" => task_number(tokens, "delete").map(Self::Delete),
            "todo" => parse_todo(tokens),
            "deadline" => parse_deadline(tokens),
            "event" => parse_event(tokens),
            "find" => parse_find(tokens),
            "tag" => parse_tag(tokens),
            "untag" => parse_untag(tokens),
            _ => Err(TaskBotError::UnknownCommand(word.clone())),
        }
    }
}

fn parse_number(token: &str) -> Result<i64, TaskBotError> {
    token.parse().map_err(|_| TaskBotError::InvalidCommand)
}

fn task_number(tokens: &[String], word: &'static str) -> Result<i64, TaskBotError> {
    let Some(token) = tokens.get(1) else {
        return Err(TaskBotError::MissingArgument(match word {
            "mark" => "'mark' requires the parameter 'task number'!",
            "unmark" => "'unmark' requires the parameter 'task number'!",
            _ => "'delete' requires the parameter 'task number'!",
        }));
    };
    parse_number(token)
}

/// Position of the last occurrence of `marker`, or 0 when absent.
fn marker_position(tokens: &[String], marker: &str) -> usize {
    tokens.iter().rposition(|t| t == marker).unwrap_or(0)
}

fn parse_todo(tokens: &[String]) -> Result<Command, TaskBotError> {
    if tokens.len() < 2 {
        return Err(TaskBotError::MissingDescription("todo"));
    }
    Ok(Command::Todo {
        name: tokens[1..].join(" "),
    })
}

fn parse_deadline(tokens: &[String]) -> Result<Command, TaskBotError> {
    let by = marker_position(tokens, BY_MARKER);
    let len = tokens.len();

    if by <= 1 {
        return Err(TaskBotError::MissingDescription("deadline"));
    }
    if by == len - 1 {
        return Err(TaskBotError::MissingDeadline);
    }
    if by == len - 2 {
        return Err(TaskBotError::MissingDateOrTime("deadline"));
    }

    let due = datetime::parse_date_time(&tokens[by + 1], &tokens[by + 2])?;
    Ok(Command::Deadline {
        name: tokens[1..by].join(" "),
        due,
    })
}

fn parse_event(tokens: &[String]) -> Result<Command, TaskBotError> {
    let from = marker_position(tokens, FROM_MARKER);
    let to = marker_position(tokens, TO_MARKER);
    let len = tokens.len();

    if from <= 1 {
        return Err(TaskBotError::MissingDescription("event"));
    }
    // `to` may be 0 (absent) or sit before `from`
    if to <= from + 1 {
        return Err(TaskBotError::MissingEventStart);
    }
    if to == len - 1 {
        return Err(TaskBotError::MissingEventEnd);
    }
    if to == from + 2 {
        return Err(TaskBotError::MissingDateOrTime("event's start"));
    }
    if to == len - 2 {
        return Err(TaskBotError::MissingDateOrTime("event's end"));
    }

    let start = datetime::parse_date_time(&tokens[from + 1], &tokens[from + 2])?;
    let end = datetime::parse_date_time(&tokens[to + 1], &tokens[to + 2])?;
    Ok(Command::Event {
        name: tokens[1..from].join(" "),
        start,
        end,
    })
}

fn parse_find(tokens: &[String]) -> Result<Command, TaskBotError> {
    match tokens.len() {
        1 => Err(TaskBotError::MissingKeyword),
        2 => Ok(Command::Find {
            keyword: tokens[1].clone(),
        }),
        _ => Err(TaskBotError::TooManyKeywords),
    }
}

/// Tokens after the tag text are ignored.
fn parse_tag(tokens: &[String]) -> Result<Command, TaskBotError> {
    if tokens.len() < 3 {
        return Err(TaskBotError::MissingArgument(
            "'tag' requires the next two parameters 'task number' and 'tag name'!",
        ));
    }
    Ok(Command::Tag {
        number: parse_number(&tokens[1])?,
        text: tokens[2].clone(),
    })
}

fn parse_untag(tokens: &[String]) -> Result<Command, TaskBotError> {
    if tokens.len() < 2 {
        return Err(TaskBotError::MissingArgument(
            "'untag' requires the parameter 'task number'!",
        ));
    }
    parse_number(&tokens[1]).map(Command::Untag)
}
