//! Timestamp parsing: user input, persisted text, and display formats.

use crate::error::TaskBotError;
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;

/// Format used when writing timestamps to the task file.
pub const STORAGE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Older task files omit the seconds when they are zero.
const LEGACY_STORAGE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Default display format, e.g. `May 1 23:59`.
pub const DEFAULT_DISPLAY_FORMAT: &str = "%b %-d %H:%M";

/// Combine a `yyyy-mm-dd` date token and an `HH:mm` time token.
pub fn parse_date_time(date: &str, time: &str) -> Result<NaiveDateTime, TaskBotError> {
    let combined = format!("{date}T{time}:00");
    NaiveDateTime::parse_from_str(&combined, STORAGE_FORMAT).map_err(|_| TaskBotError::BadTimestamp)
}

/// Parse a timestamp as written to the task file.
pub fn parse_stored(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, STORAGE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, LEGACY_STORAGE_FORMAT))
        .ok()
}

/// Render a timestamp for the task file.
pub fn format_stored(ts: NaiveDateTime) -> String {
    ts.format(STORAGE_FORMAT).to_string()
}

/// Check that a strftime pattern can be rendered without error.
pub fn validate_display_format(pattern: &str) -> Result<(), TaskBotError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(TaskBotError::ConfigError(format!(
            "Invalid date format: {pattern}"
        )));
    }
    Ok(())
}
