pub mod command;
pub mod datetime;
pub mod task;
