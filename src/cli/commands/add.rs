//! `todo`, `deadline` and `event` commands.

use crate::cli::output::{self, Renderer};
use crate::domain::task::Task;
use crate::error::TaskBotError;
use crate::storage::task_list::TaskList;
use chrono::NaiveDateTime;
use tracing::warn;

/// What to do with an event that starts before "now".
#[derive(Debug, Clone, Copy)]
pub struct PastStartPolicy {
    pub now: NaiveDateTime,
    pub allow: bool,
}

pub fn run_todo(list: &TaskList, name: String, renderer: &Renderer) -> Result<String, TaskBotError> {
    add(list, Task::todo(name), renderer)
}

pub fn run_deadline(
    list: &TaskList,
    name: String,
    due: NaiveDateTime,
    renderer: &Renderer,
) -> Result<String, TaskBotError> {
    add(list, Task::deadline(name, due), renderer)
}

pub fn run_event(
    list: &TaskList,
    name: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    policy: PastStartPolicy,
    renderer: &Renderer,
) -> Result<String, TaskBotError> {
    let task = Task::event(name, start, end)?;

    let in_past = start <= policy.now;
    if in_past && !policy.allow {
        return Err(TaskBotError::EventInPast);
    }

    let mut msg = add(list, task, renderer)?;
    if in_past {
        warn!(%start, "added an event that has already started");
        msg.push_str("\nHeads up: this event's start time is already in the past!");
    }
    Ok(msg)
}

fn add(list: &TaskList, task: Task, renderer: &Renderer) -> Result<String, TaskBotError> {
    let shown = renderer.task(&task);
    let count = list.add(task)?;
    Ok(format!(
        "Got it. I've added this task:\n{shown}\nNow you have {} in the list.",
        output::task_count(count)
    ))
}
