//! Interactive line-by-line session.

use crate::cli::parser::Parser;
use crate::error::TaskBotError;
use crate::storage::task_list::TaskList;
use std::io::{BufRead, Write};

pub const GREETING: &str = "Hello! I'm taskbot.\nWhat can I do for you?";
pub const FAREWELL: &str = "Bye. Hope to see you again soon!";

/// Read commands until `bye` or end of input, writing one reply per line.
pub fn run(
    parser: &Parser,
    list: &TaskList,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<(), TaskBotError> {
    writeln!(out, "{GREETING}")?;
    for line in input.lines() {
        let line = line?;
        if line.trim().eq_ignore_ascii_case("bye") {
            break;
        }
        let reply = parser.execute(list, &line)?;
        writeln!(out, "{reply}")?;
        out.flush()?;
    }
    writeln!(out, "{FAREWELL}")?;
    Ok(())
}
