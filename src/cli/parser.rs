//! Turns one line of user input into a task list change and a reply.

use crate::cli::commands::{self, add::PastStartPolicy};
use crate::cli::output::Renderer;
use crate::domain::command::{self, Command};
use crate::error::TaskBotError;
use crate::storage::task_list::TaskList;
use chrono::Local;
use tracing::debug;

pub struct Parser {
    renderer: Renderer,
    allow_past_events: bool,
}

impl Parser {
    pub fn new(renderer: Renderer, allow_past_events: bool) -> Self {
        Self {
            renderer,
            allow_past_events,
        }
    }

    /// Execute one command line against `list` and return the reply.
    ///
    /// Bad input is answered with a message; only storage and I/O failures
    /// come back as `Err`.
    pub fn execute(&self, list: &TaskList, input: &str) -> Result<String, TaskBotError> {
        let tokens = command::tokenize(input);
        let result = Command::parse(&tokens).and_then(|cmd| {
            debug!(?cmd, "dispatching");
            self.dispatch(list, cmd)
        });

        match result {
            Err(e) if e.is_user_error() => {
                debug!(error = %e, input, "rejected command");
                Ok(self.renderer.rejection(&e.to_string()))
            }
            other => other,
        }
    }

    fn dispatch(&self, list: &TaskList, cmd: Command) -> Result<String, TaskBotError> {
        let r = &self.renderer;
        match cmd {
            Command::List => commands::list::run(list, r),
            Command::Mark(number) => commands::mark::run_mark(list, number, r),
            Command::Unmark(number) => commands::mark::run_unmark(list, number, r),
            Command::Delete(number) => commands::delete::run(list, number, r),
            Command::Todo { name } => commands::add::run_todo(list, name, r),
            Command::Deadline { name, due } => commands::add::run_deadline(list, name, due, r),
            Command::Event { name, start, end } => {
                let policy = PastStartPolicy {
                    now: Local::now().naive_local(),
                    allow: self.allow_past_events,
                };
                commands::add::run_event(list, name, start, end, policy, r)
            }
            Command::Find { keyword } => commands::find::run(list, &keyword, r),
            Command::Tag { number, text } => commands::tag::run_tag(list, number, text, r),
            Command::Untag(number) => commands::tag::run_untag(list, number, r),
        }
    }
}
