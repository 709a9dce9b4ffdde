use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::model::config::{Config, is_valid_timestamp_format};

pub const APP_DIR_NAME: &str = "taskmaster";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_TASK_FILE: &str = "tasks.txt";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid [ui] timestamp_format {format:?} in {path}")]
    TimestampFormat { path: PathBuf, format: String },
}

/// Resolve the data directory holding config, tasks and logs.
///
/// `$TM_HOME` wins, then `$XDG_DATA_HOME/taskmaster`, then the platform default.
pub fn data_dir() -> PathBuf {
    if let Some(home) = non_empty_var("TM_HOME") {
        return PathBuf::from(home);
    }
    if let Some(xdg) = non_empty_var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join(APP_DIR_NAME);
    }
    let base = match std::env::consts::OS {
        "windows" => non_empty_var("LOCALAPPDATA").unwrap_or_else(|| ".".into()),
        "macos" => non_empty_var("HOME").unwrap_or_else(|| ".".into()) + "/Library/Application Support",
        _ => non_empty_var("HOME").unwrap_or_else(|| ".".into()) + "/.local/share",
    };
    Path::new(&base).join(APP_DIR_NAME)
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Load config from an explicit path, or from `config.toml` in the data directory.
/// A missing file gives the defaults; an explicit path must exist.
pub fn load_config(explicit: Option<&Path>, data_dir: &Path) -> Result<Config, ConfigError> {
    let (path, required) = match explicit {
        Some(p) => (p.to_path_buf(), true),
        None => (data_dir.join(CONFIG_FILE_NAME), false),
    };

    let text = match fs::read_to_string(&path) {
        Ok(t) => t,
        Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        Err(e) => return Err(ConfigError::Read { path, source: e }),
    };

    let config: Config = match toml::from_str(&text) {
        Ok(c) => c,
        Err(e) => return Err(ConfigError::Parse { path, source: e }),
    };
    if !is_valid_timestamp_format(&config.ui.timestamp_format) {
        return Err(ConfigError::TimestampFormat {
            path,
            format: config.ui.timestamp_format,
        });
    }
    Ok(config)
}

/// Pick the task file: command-line override, then config, then the default name.
/// Relative config paths resolve against the data directory.
pub fn resolve_task_file(override_path: Option<&Path>, config: &Config, data_dir: &Path) -> PathBuf {
    if let Some(p) = override_path {
        return p.to_path_buf();
    }
    match &config.storage.file {
        Some(p) if p.is_absolute() => p.clone(),
        Some(p) => data_dir.join(p),
        None => data_dir.join(DEFAULT_TASK_FILE),
    }
}
