//! `tag` and `untag` commands.

use crate::cli::commands::index_of;
use crate::cli::output::Renderer;
use crate::error::TaskBotError;
use crate::storage::task_list::TaskList;

pub fn run_tag(
    list: &TaskList,
    number: i64,
    text: String,
    renderer: &Renderer,
) -> Result<String, TaskBotError> {
    let index = index_of(number)?;
    list.tag(index, text)?;
    let task = list.get(index)?;
    Ok(format!(
        "OK, I've tagged this task as such:\n{}",
        renderer.task(&task)
    ))
}

pub fn run_untag(list: &TaskList, number: i64, renderer: &Renderer) -> Result<String, TaskBotError> {
    let index = index_of(number)?;
    list.untag(index)?;
    let task = list.get(index)?;
    Ok(format!(
        "OK, I've untagged this task as such:\n{}",
        renderer.task(&task)
    ))
}
