use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings file read by the `trains` program.
pub const TRAINS_SETTINGS_FILE: &str = "appsettings.json";

/// Settings file read by the `movies` program.
///
/// The name differs from [`TRAINS_SETTINGS_FILE`] on purpose; existing
/// deployments ship the file under this name.
pub const MOVIES_SETTINGS_FILE: &str = "appsetting.json";

/// Name of the connection string both programs resolve.
pub const DEFAULT_CONNECTION: &str = "DefaultConnection";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(rename = "ConnectionStrings", default)]
    connection_strings: HashMap<String, String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Settings file not found: {0}")]
    MissingFile(PathBuf),
    #[error("Settings file {0} could not be read: {1}")]
    Unreadable(PathBuf, String),
    #[error("Settings file is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("Missing connection string: {0}")]
    MissingKey(String),
}

impl Settings {
    /// Load `file_name` from the current working directory.
    pub fn load(file_name: &str) -> Result<Self, ConfigError> {
        let base = std::env::current_dir()
            .map_err(|e| ConfigError::Unreadable(PathBuf::from(file_name), e.to_string()))?;
        Self::load_from(&base, file_name)
    }

    pub fn load_from(dir: &Path, file_name: &str) -> Result<Self, ConfigError> {
        let path = dir.join(file_name);
        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::MissingFile(path.clone()),
            _ => ConfigError::Unreadable(path.clone(), e.to_string()),
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::InvalidJson(e.to_string()))
    }

    /// Resolve a named entry of the `ConnectionStrings` section.
    pub fn connection_string(&self, name: &str) -> Result<&str, ConfigError> {
        self.connection_strings
            .get(name)
            .map(|s| s.as_str())
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingKey(name.to_string()))
    }

    pub fn default_connection(&self) -> Result<&str, ConfigError> {
        self.connection_string(DEFAULT_CONNECTION)
    }
}
