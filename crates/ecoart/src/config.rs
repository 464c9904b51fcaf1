//! Configuration management for ecoart.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_SLOT_KEY;
use crate::error::{Error, Result};
use crate::project::Category;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "ecoart";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "catalog.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ECOART_`)
/// 2. TOML config file at `~/.config/ecoart/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Catalog configuration.
    pub catalog: CatalogConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/ecoart/catalog.db`
    pub database_path: Option<PathBuf>,
    /// Name of the slot holding the project collection.
    pub slot_key: String,
}

/// Catalog-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Category given to new projects when none is specified.
    pub default_category: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_category: Category::default().as_str().to_string(),
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
    /// Later sources override earlier ones: defaults, then the TOML file
    /// (if it exists), then `ECOART_`-prefixed environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("ECOART_").split("__"));

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
        let slot_key = &self.storage.slot_key;
        if slot_key.is_empty() {
            return Err(Error::ConfigValidation {
                message: "slot_key must not be empty".to_string(),
            });
        }
        if slot_key.chars().any(char::is_whitespace) {
            return Err(Error::ConfigValidation {
                message: format!("slot_key must not contain whitespace: {slot_key:?}"),
            });
        }

        if self.catalog.default_category.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "default_category must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert_eq!(config.storage.slot_key, "artProjects");
        assert_eq!(config.catalog.default_category, "portraits");
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_slot_key() {
        let mut config = Config::default();
        config.storage.slot_key = String::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("slot_key"));
    }

    #[test]
    fn test_validate_whitespace_slot_key() {
        let mut config = Config::default();
        config.storage.slot_key = "art projects".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("whitespace"));
    }

    #[test]
    fn test_validate_empty_default_category() {
        let mut config = Config::default();
        config.catalog.default_category = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("default_category"));
    }

    #[test]
    fn test_database_path_default() {
        let path = Config::default().database_path();
        assert!(path.to_string_lossy().contains("catalog.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/db.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/db.sqlite")
        );
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("ecoart"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_default_data_dir() {
        assert!(Config::default_data_dir().to_string_lossy().contains("ecoart"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path =
            std::env::temp_dir().join(format!("ecoart_config_test_{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[storage]\nslot_key = \"testProjects\"\n\n[catalog]\ndefault_category = \"community\""
        )
        .unwrap();
        drop(file);

        let config = Config::load_from(Some(path.clone())).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.storage.slot_key, "testProjects");
        assert_eq!(config.catalog.default_category, "community");
        assert!(config.storage.database_path.is_none());
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let path = std::env::temp_dir().join(format!(
            "ecoart_config_invalid_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[storage]\nslot_key = \"\"\n").unwrap();

        let result = Config::load_from(Some(path.clone()));
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("slot_key"));
        assert!(json.contains("default_category"));
    }

    #[test]
    fn test_storage_config_deserialize_partial() {
        let json = r#"{"database_path": "/tmp/x.db"}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(storage.database_path, Some(PathBuf::from("/tmp/x.db")));
        assert_eq!(storage.slot_key, "artProjects");
    }
}
