mod cli;
mod config;
mod domain;
mod error;
mod storage;

use crate::cli::args::{Cli, Command};
use crate::cli::output::{OutputFormat, Renderer};
use crate::cli::parser::Parser as CommandParser;
use crate::config::Config;
use crate::error::TaskBotError;
use crate::storage::csv_file::Storage;
use crate::storage::task_list::TaskList;
use clap::Parser;
use std::io;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color);
    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(source) = std::error::Error::source(&e) {
                eprintln!("  caused by: {source}");
            }
            process::exit(e.exit_code());
        }
    }
}

fn init_logging(verbose: u8, no_color: bool) {
    let env_filter = EnvFilter::try_from_env("TASKBOT_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose > 0 { "taskbot=debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_ansi(!no_color)
        .init();
}

fn run(cli: Cli) -> Result<String, TaskBotError> {
    let config_path = cli.config.as_deref().map(Path::new);

    // Handle init and completions before loading config/storage
    match &cli.command {
        Some(Command::Init { force }) => return cli::commands::init::run(config_path, *force),
        Some(Command::Completions { shell }) => return cli::commands::completions::run(shell),
        _ => {}
    }

    let config = Config::load(config_path, cli.data_file.as_deref())?;
    let format = OutputFormat::from_flags(cli.no_color, config.display.color);
    let renderer = Renderer::new(config.display.date_format.clone(), format);
    let parser = CommandParser::new(renderer, config.events.allow_past_start);
    let list = TaskList::new(Storage::new(config.data_file())?);

    match cli.command {
        Some(Command::Init { .. } | Command::Completions { .. }) => unreachable!(),

        Some(Command::Run { words }) => parser.execute(&list, &words.join(" ")),

        None => {
            let stdin = io::stdin();
            cli::session::run(&parser, &list, stdin.lock(), io::stdout().lock())?;
            Ok(String::new())
        }
    }
}
