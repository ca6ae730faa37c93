pub mod args;
pub mod commands;
pub mod output;
pub mod parser;
pub mod session;
