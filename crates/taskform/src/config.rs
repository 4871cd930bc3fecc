//! Configuration management for taskform.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "taskform";

/// Default data file name.
const DATA_FILE_NAME: &str = "tasks.json";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "TASKFORM_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `TASKFORM_`, sections separated by `__`)
/// 2. TOML config file at `~/.config/taskform/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Display configuration.
    pub display: DisplayConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the JSON data file.
    /// Defaults to `~/.local/share/taskform/tasks.json`
    pub data_file: Option<PathBuf>,
    /// Write indented JSON instead of a single line.
    pub pretty: bool,
}

/// How records are shown by the command-line front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Hide passwords unless explicitly requested.
    pub mask_passwords: bool,
    /// Character substituted for each password character.
    pub mask_char: char,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mask_passwords: true,
            mask_char: '*',
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.storage.data_file {
            if path.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "storage.data_file must not be empty".to_string(),
                });
            }
        }

        if self.display.mask_char.is_control() || self.display.mask_char.is_whitespace() {
            return Err(Error::ConfigValidation {
                message: format!(
                    "display.mask_char must be a visible character, got {:?}",
                    self.display.mask_char
                ),
            });
        }

        Ok(())
    }

    /// Get the data file path, resolving defaults if not set.
    #[must_use]
    pub fn data_file(&self) -> PathBuf {
        self.storage
            .data_file
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATA_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.data_file.is_none());
        assert!(!config.storage.pretty);
        assert!(config.display.mask_passwords);
        assert_eq!(config.display.mask_char, '*');
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_data_file() {
        let mut config = Config::default();
        config.storage.data_file = Some(PathBuf::new());

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("data_file"));
    }

    #[test]
    fn test_validate_whitespace_mask_char() {
        let mut config = Config::default();
        config.display.mask_char = ' ';

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("mask_char"));
    }

    #[test]
    fn test_data_file_default() {
        let path = Config::default().data_file();
        assert!(path.ends_with("taskform/tasks.json"));
    }

    #[test]
    fn test_data_file_custom() {
        let mut config = Config::default();
        config.storage.data_file = Some(PathBuf::from("/custom/records.json"));

        assert_eq!(config.data_file(), PathBuf::from("/custom/records.json"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("taskform"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\ndata_file = \"/srv/tasks.json\"\npretty = true\n\n[display]\nmask_char = \"#\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();

        assert_eq!(config.data_file(), PathBuf::from("/srv/tasks.json"));
        assert!(config.storage.pretty);
        assert_eq!(config.display.mask_char, '#');
        assert!(config.display.mask_passwords);
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\nmask_char = \" \"\n").unwrap();

        let err = Config::load_from(Some(path)).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage\npretty = yes").unwrap();

        let err = Config::load_from(Some(path)).unwrap_err();
        assert!(matches!(err, Error::ConfigLoad(_)));
    }

    #[test]
    fn test_display_config_deserialize_partial() {
        let json = r#"{"mask_passwords": false}"#;
        let display: DisplayConfig = serde_json::from_str(json).unwrap();
        assert!(!display.mask_passwords);
        assert_eq!(display.mask_char, '*');
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("data_file"));
        assert!(json.contains("mask_passwords"));
    }
}
