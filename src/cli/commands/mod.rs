pub mod add;
pub mod completions;
pub mod delete;
pub mod find;
pub mod init;
pub mod list;
pub mod mark;
pub mod tag;

use crate::domain::command;
use crate::error::TaskBotError;

/// Turn a user-facing task number into a list index.
pub(crate) fn index_of(number: i64) -> Result<usize, TaskBotError> {
    command::to_index(number).ok_or(TaskBotError::NoSuchTask(number))
}
