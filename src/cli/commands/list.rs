//! `list` command.

use crate::cli::output::Renderer;
use crate::error::TaskBotError;
use crate::storage::task_list::TaskList;

pub fn run(list: &TaskList, renderer: &Renderer) -> Result<String, TaskBotError> {
    let tasks = list.tasks()?;
    if tasks.is_empty() {
        return Ok("You have no tasks in your list.".to_string());
    }
    Ok(renderer.numbered("Here are the tasks in your list:", &tasks))
}
