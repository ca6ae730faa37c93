//! `mark` and `unmark` commands.

use crate::cli::commands::index_of;
use crate::cli::output::Renderer;
use crate::error::TaskBotError;
use crate::storage::task_list::TaskList;

pub fn run_mark(list: &TaskList, number: i64, renderer: &Renderer) -> Result<String, TaskBotError> {
    let index = index_of(number)?;
    list.mark(index)?;
    let task = list.get(index)?;
    Ok(format!(
        "Nice! I've marked this task as done:\n{}",
        renderer.task(&task)
    ))
}

pub fn run_unmark(
    list: &TaskList,
    number: i64,
    renderer: &Renderer,
) -> Result<String, TaskBotError> {
    let index = index_of(number)?;
    list.unmark(index)?;
    let task = list.get(index)?;
    Ok(format!(
        "OK, I've marked this task as not done yet:\n{}",
        renderer.task(&task)
    ))
}
