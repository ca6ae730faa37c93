//! `delete` command.

use crate::cli::commands::index_of;
use crate::cli::output::{self, Renderer};
use crate::error::TaskBotError;
use crate::storage::task_list::TaskList;

pub fn run(list: &TaskList, number: i64, renderer: &Renderer) -> Result<String, TaskBotError> {
    let removed = list.delete(index_of(number)?)?;
    Ok(format!(
        "Noted, I've removed this task:\n{}\nNow you have {} in the list.",
        renderer.task(&removed),
        output::task_count(list.size()?)
    ))
}
