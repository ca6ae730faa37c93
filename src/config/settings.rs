//! Configuration file loading and default values.

use crate::domain::datetime::{self, DEFAULT_DISPLAY_FORMAT};
use crate::error::TaskBotError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub display: DisplayConfig,
    pub events: EventConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub file: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
    pub date_format: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Accept events whose start is already in the past (with a warning).
    pub allow_past_start: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        let file = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("taskbot")
            .join("tasks.csv");
        Self {
            file: file.to_string_lossy().into_owned(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            date_format: DEFAULT_DISPLAY_FORMAT.to_string(),
        }
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            allow_past_start: true,
        }
    }
}

impl Config {
    /// Load configuration with the resolution order:
    /// CLI args > env vars > config file > defaults.
    pub fn load(config_path: Option<&Path>, data_file: Option<&str>) -> Result<Self, TaskBotError> {
        let path = config_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("TASKBOT_CONFIG").ok().map(PathBuf::from))
            .unwrap_or_else(default_config_path);

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| TaskBotError::ConfigError(format!("{}: {e}", path.display())))?;
            toml::from_str::<Config>(&content)
                .map_err(|e| TaskBotError::ConfigError(format!("{}: {e}", path.display())))?
        } else {
            Config::default()
        };

        if let Some(file) = data_file {
            config.data.file = file.to_string();
        } else if let Ok(file) = std::env::var("TASKBOT_DATA_FILE") {
            config.data.file = file;
        }

        datetime::validate_display_format(&config.display.date_format)?;
        Ok(config)
    }

    /// Resolve the task file path, expanding `~`.
    pub fn data_file(&self) -> PathBuf {
        expand_tilde(&self.data.file)
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        r#"[data]
file = "~/.local/share/taskbot/tasks.csv"

[display]
color = true
date_format = "%b %-d %H:%M"

[events]
allow_past_start = true
"#
        .to_string()
    }
}

/// `<config_dir>/taskbot/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("taskbot")
        .join("config.toml")
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_display() {
        let cfg = Config::default();
        assert!(cfg.display.color);
        assert_eq!(cfg.display.date_format, "%b %-d %H:%M");
        assert!(cfg.events.allow_past_start);
        assert!(cfg.data.file.ends_with("tasks.csv"));
    }

    #[test]
    fn default_toml_parses() {
        let cfg: Config = toml::from_str(&Config::default_toml()).unwrap();
        assert_eq!(cfg.data.file, "~/.local/share/taskbot/tasks.csv");
        assert_eq!(cfg.display.date_format, DEFAULT_DISPLAY_FORMAT);
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[events]
allow_past_start = false
"#;
        let cfg: Config = toml::from_str(toml_str).unwrap();
        assert!(!cfg.events.allow_past_start);
        // Other sections should be defaults
        assert!(cfg.display.color);
    }

    #[test]
    fn load_from_file_with_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[display]\ncolor = false\ndate_format = \"%Y-%m-%d %H:%M\"\n\n[data]\nfile = \"/tmp/a.csv\"\n",
        )
        .unwrap();

        let cfg = Config::load(Some(path.as_path()), Some("/tmp/b.csv")).unwrap();
        assert!(!cfg.display.color);
        assert_eq!(cfg.display.date_format, "%Y-%m-%d %H:%M");
        assert_eq!(cfg.data.file, "/tmp/b.csv");
    }

    #[test]
    fn bad_date_format_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\ndate_format = \"%Q\"\n").unwrap();
        assert!(matches!(
            Config::load(Some(path.as_path()), Some("/tmp/x.csv")),
            Err(TaskBotError::ConfigError(_))
        ));
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display\n").unwrap();
        let err = Config::load(Some(path.as_path()), None).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn data_file_override() {
        let cfg = Config::load(Some(Path::new("/nonexistent/config.toml")), Some("/tmp/my.csv"))
            .unwrap();
        assert_eq!(cfg.data_file(), PathBuf::from("/tmp/my.csv"));
    }

    #[test]
    fn expand_tilde_works() {
        let result = expand_tilde("~/test");
        assert!(!result.to_string_lossy().starts_with("~/"));
    }

    #[test]
    fn expand_absolute_path() {
        let result = expand_tilde("/absolute/path");
        assert_eq!(result, PathBuf::from("/absolute/path"));
    }
}
