//! Command-line argument definitions using clap derive.

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "taskbot",
    version,
    about = "A chatty task tracker for todos, deadlines and events"
)]
pub struct Cli {
    /// What to do. Without a subcommand, start an interactive session.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Override task file path.
    #[arg(long, global = true)]
    pub data_file: Option<String>,

    /// Override config file path.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log debug diagnostics to stderr (`TASKBOT_LOG` takes precedence).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a single command, e.g. `taskbot run deadline report /by 2024-05-01 23:59`.
    Run {
        /// The command words.
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// Initialize a default configuration file.
    Init {
        /// Overwrite existing config file.
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell type (bash, zsh, fish).
        shell: String,
    },
}
