//! Index-addressed task operations over [`Storage`].
//!
//! Nothing is cached: every call reloads the file, and every mutation writes
//! the whole collection back.

use crate::domain::task::Task;
use crate::error::TaskBotError;
use crate::storage::csv_file::Storage;
use tracing::{debug, info};

pub struct TaskList {
    storage: Storage,
}

impl TaskList {
    pub fn new(storage: Storage) -> Self {
        debug!(path = %storage.path().display(), "opened task list");
        Self { storage }
    }

    /// All tasks in stored order.
    pub fn tasks(&self) -> Result<Vec<Task>, TaskBotError> {
        self.storage.load()
    }

    pub fn size(&self) -> Result<usize, TaskBotError> {
        Ok(self.storage.load()?.len())
    }

    /// The task at a 0-based index.
    pub fn get(&self, index: usize) -> Result<Task, TaskBotError> {
        self.storage
            .load()?
            .into_iter()
            .nth(index)
            .ok_or_else(|| no_such_task(index))
    }

    pub fn mark(&self, index: usize) -> Result<(), TaskBotError> {
        self.update(index, |task| task.done = true)
    }

    pub fn unmark(&self, index: usize) -> Result<(), TaskBotError> {
        self.update(index, |task| task.done = false)
    }

    /// Append a task and return the new size of the list.
    pub fn add(&self, task: Task) -> Result<usize, TaskBotError> {
        let mut tasks = self.storage.load()?;
        info!(name = %task.name, kind = task.kind().code(), "adding task");
        tasks.push(task);
        self.storage.save(&tasks)?;
        Ok(tasks.len())
    }

    /// Remove the task at `index` and return it.
    pub fn delete(&self, index: usize) -> Result<Task, TaskBotError> {
        let mut tasks = self.storage.load()?;
        if index >= tasks.len() {
            return Err(no_such_task(index));
        }
        let removed = tasks.remove(index);
        self.storage.save(&tasks)?;
        info!(index, name = %removed.name, "deleted task");
        Ok(removed)
    }

    pub fn tag(&self, index: usize, text: String) -> Result<(), TaskBotError> {
        self.update(index, |task| task.tags.push(text))
    }

    /// Remove the most recently added tag.
    pub fn untag(&self, index: usize) -> Result<(), TaskBotError> {
        let mut tasks = self.storage.load()?;
        let task = tasks.get_mut(index).ok_or_else(|| no_such_task(index))?;
        if task.tags.pop().is_none() {
            return Err(TaskBotError::NoTags(task_number(index)));
        }
        self.storage.save(&tasks)
    }

    fn update(&self, index: usize, apply: impl FnOnce(&mut Task)) -> Result<(), TaskBotError> {
        let mut tasks = self.storage.load()?;
        let task = tasks.get_mut(index).ok_or_else(|| no_such_task(index))?;
        apply(task);
        self.storage.save(&tasks)
    }
}

fn task_number(index: usize) -> i64 {
    i64::try_from(index).map_or(i64::MAX, |i| i.saturating_add(1))
}

fn no_such_task(index: usize) -> TaskBotError {
    TaskBotError::NoSuchTask(task_number(index))
}
