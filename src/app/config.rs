use super::keymap::KeyConfig;
use crate::theme::PaletteType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub keys: KeyConfig,
    pub palette: PaletteConfig,
    pub theme: PaletteType,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    pub command_placeholder: String,
    pub session_placeholder: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            command_placeholder: "Execute a command…".to_string(),
            session_placeholder: "Search open sessions…".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    /// Defaults to `switchyard.log` next to the config file.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

pub fn config_dir() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("switchyard");
        path
    })
}

pub fn get_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

impl Config {
    /// Loads the user config. A missing file yields defaults; a broken one
    /// is handed back so the caller can report it once logging is up.
    pub fn try_load() -> Result<Self, ConfigError> {
        match get_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    #[must_use]
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log
            .file
            .clone()
            .or_else(|| config_dir().map(|dir| dir.join("switchyard.log")))
    }
}
