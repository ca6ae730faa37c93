//! `find` command.

use crate::cli::output::Renderer;
use crate::error::TaskBotError;
use crate::storage::task_list::TaskList;

pub fn run(list: &TaskList, keyword: &str, renderer: &Renderer) -> Result<String, TaskBotError> {
    let tasks = list.tasks()?;
    let matches: Vec<_> = tasks.iter().filter(|t| t.name_has_word(keyword)).collect();

    if matches.is_empty() {
        return Ok("No matching tasks found.".to_string());
    }
    Ok(renderer.numbered("Here are the matching tasks in your list:", matches))
}
