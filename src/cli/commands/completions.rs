//! `taskbot completions`: print a shell completion script.

use crate::cli::args::Cli;
use crate::error::TaskBotError;
use clap::CommandFactory;
use clap_complete::{generate, Shell};

pub fn run(shell_name: &str) -> Result<String, TaskBotError> {
    let shell = match shell_name.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        other => {
            return Err(TaskBotError::InvalidArgument(format!(
                "No completion script for '{other}' (try bash, zsh or fish)"
            )));
        }
    };

    let mut script = Vec::new();
    generate(shell, &mut Cli::command(), "taskbot", &mut script);
    String::from_utf8(script).map_err(|e| TaskBotError::Io(std::io::Error::other(e)))
}
