//! `taskbot init` command.

use crate::config::settings::{self, Config};
use crate::error::TaskBotError;
use std::path::Path;

pub fn run(config_path: Option<&Path>, force: bool) -> Result<String, TaskBotError> {
    let config_path = config_path.map_or_else(settings::default_config_path, Path::to_path_buf);

    if config_path.exists() && !force {
        return Err(TaskBotError::ConfigError(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    if let Some(dir) = config_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(&config_path, Config::default_toml())?;

    Ok(format!(
        "Created configuration file: {}",
        config_path.display()
    ))
}
