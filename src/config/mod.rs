//! Configuration module for recipebox
//!
//! Configuration is stored as TOML in the user's config directory and can be
//! overridden per key with `RECIPEBOX_*` environment variables, using `__`
//! between section and field (e.g. `RECIPEBOX_API__TIMEOUT_SECS=5`).

use crate::api::ApiSettings;
use crate::app::ExploreQueries;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "RECIPEBOX";

/// Keys accepted by [`RecipeboxConfig::get`] and [`RecipeboxConfig::set`]
pub const KEYS: [&str; 8] = [
    "api.base_url",
    "api.timeout_secs",
    "explore.recommended",
    "explore.trending",
    "storage.path",
    "log.level",
    "log.file",
    "quiet",
];

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Remote recipe service
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let defaults = ApiSettings::default();
        Self {
            base_url: defaults.base_url,
            timeout_secs: defaults.timeout.as_secs(),
        }
    }
}

/// Searches that fill the Explore view
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ExploreConfig {
    pub recommended: String,
    pub trending: String,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        let defaults = ExploreQueries::default();
        Self {
            recommended: defaults.recommended,
            trending: defaults.trending,
        }
    }
}

/// Favorites database location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Defaults to `<data_dir>/recipebox/favorites.db`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Logging
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
    /// Log file for the interactive browser; defaults to
    /// `<data_dir>/recipebox/recipebox.log`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct RecipeboxConfig {
    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub explore: ExploreConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub log: LogConfig,
}

fn data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_dir()
        .map(|dir| dir.join("recipebox"))
        .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))
}

impl RecipeboxConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("recipebox").join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there first if absent
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(path, Some(Environment::with_prefix(ENV_PREFIX)))
    }

    /// Load only what the config file at `path` holds
    ///
    /// `RECIPEBOX_*` variables are ignored, so the result can be saved back
    /// without persisting them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or created.
    pub fn load_stored_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(path, None)
    }

    /// Change one key in the config file at `path` and return the stored values
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for an unknown key, another
    /// `ConfigError` for an invalid value or if the file cannot be read or
    /// written.
    pub fn set_stored_at(path: &Path, key: &str, value: &str) -> Result<Self, ConfigError> {
        let mut stored = Self::load_stored_from(path)?;
        stored.set(key, value)?;
        stored.save_to(path)?;
        Ok(stored)
    }

    /// [`Self::set_stored_at`] on the default config file
    ///
    /// # Errors
    ///
    /// Same as [`Self::set_stored_at`], or if the config directory cannot be
    /// determined.
    pub fn set_stored(key: &str, value: &str) -> Result<Self, ConfigError> {
        Self::set_stored_at(&Self::config_path()?, key, value)
    }

    fn build(path: &Path, env: Option<Environment>) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::default().save_to(path)?;
        }

        let mut builder = Config::builder().add_source(File::from(path).format(FileFormat::Toml));
        if let Some(env) = env {
            builder = builder.add_source(env.prefix_separator("_").separator("__").try_parsing(true));
        }

        builder.build()?.try_deserialize()
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Render the configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }

    /// Read one setting by dotted key
    ///
    /// Unset optional paths read as an empty string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for unknown keys.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let path_str = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };

        Ok(match key {
            "api.base_url" => self.api.base_url.clone(),
            "api.timeout_secs" => self.api.timeout_secs.to_string(),
            "explore.recommended" => self.explore.recommended.clone(),
            "explore.trending" => self.explore.trending.clone(),
            "storage.path" => path_str(&self.storage.path),
            "log.level" => self.log.level.clone(),
            "log.file" => path_str(&self.log.file),
            "quiet" => self.quiet.to_string(),
            _ => return Err(ConfigError::NotFound(key.to_string())),
        })
    }

    /// Change one setting by dotted key; does not save
    ///
    /// An empty value clears optional paths.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown keys or values of the wrong shape.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |expected: &str| {
            ConfigError::Message(format!("Invalid value '{value}' for {key}: expected {expected}"))
        };
        let optional_path = || (!value.is_empty()).then(|| PathBuf::from(value));

        match key {
            "api.base_url" => {
                if !value.starts_with("http://") && !value.starts_with("https://") {
                    return Err(invalid("an http(s) URL"));
                }
                self.api.base_url = value.trim_end_matches('/').to_string();
            }
            "api.timeout_secs" => {
                self.api.timeout_secs = value
                    .parse()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| invalid("a positive number of seconds"))?;
            }
            "explore.recommended" | "explore.trending" => {
                let query = value.trim();
                if query.is_empty() {
                    return Err(invalid("a non-empty search term"));
                }
                if key == "explore.recommended" {
                    self.explore.recommended = query.to_string();
                } else {
                    self.explore.trending = query.to_string();
                }
            }
            "storage.path" => self.storage.path = optional_path(),
            "log.level" => {
                let level = value.to_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(invalid("one of trace, debug, info, warn, error"));
                }
                self.log.level = level;
            }
            "log.file" => self.log.file = optional_path(),
            "quiet" => {
                self.quiet = value.parse().map_err(|_| invalid("true or false"))?;
            }
            _ => return Err(ConfigError::NotFound(key.to_string())),
        }
        Ok(())
    }

    /// Favorites database directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the system data
    /// directory cannot be determined.
    pub fn store_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.storage.path {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("favorites.db")),
        }
    }

    /// Log file used by the interactive browser
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no file is configured and the system data
    /// directory cannot be determined.
    pub fn log_file(&self) -> Result<PathBuf, ConfigError> {
        match &self.log.file {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("recipebox.log")),
        }
    }

    #[must_use]
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api.base_url.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs.max(1)),
        }
    }

    #[must_use]
    pub fn explore_queries(&self) -> ExploreQueries {
        ExploreQueries {
            recommended: self.explore.recommended.clone(),
            trending: self.explore.trending.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> Environment {
        let mut map = config::Map::new();
        for (k, v) in pairs {
            map.insert((*k).to_string(), (*v).to_string());
        }
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_default_config() {
        let config = RecipeboxConfig::default();
        assert!(!config.quiet);
        assert_eq!(config.api.base_url, "https://www.themealdb.com/api/json/v1/1");
        assert_eq!(config.explore.recommended, "chicken");
        assert_eq!(config.explore.trending, "beef");
        assert_eq!(config.log.level, "warn");
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = RecipeboxConfig::build(&path, Some(env(&[]))).unwrap();

        assert_eq!(config, RecipeboxConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = RecipeboxConfig::default();
        config.set("explore.trending", "lamb").unwrap();
        config.set("storage.path", "/tmp/recipes.db").unwrap();
        config.save_to(&path).unwrap();

        let loaded = RecipeboxConfig::build(&path, Some(env(&[]))).unwrap();

        assert_eq!(loaded.explore.trending, "lamb");
        assert_eq!(loaded.storage.path, Some(PathBuf::from("/tmp/recipes.db")));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "quiet = true\n[api]\ntimeout_secs = 3\n").unwrap();

        let config = RecipeboxConfig::build(&path, Some(env(&[]))).unwrap();

        assert!(config.quiet);
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.api.base_url, ApiConfig::default().base_url);
        assert_eq!(config.explore, ExploreConfig::default());
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        RecipeboxConfig::default().save_to(&path).unwrap();

        let config = RecipeboxConfig::build(
            &path,
            Some(env(&[
                ("RECIPEBOX_API__TIMEOUT_SECS", "5"),
                ("RECIPEBOX_EXPLORE__RECOMMENDED", "fish"),
                ("RECIPEBOX_QUIET", "true"),
            ])),
        )
        .unwrap();

        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.explore.recommended, "fish");
        assert!(config.quiet);
    }

    #[test]
    fn test_set_keeps_environment_overrides_out_of_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api]\ntimeout_secs = 3\n").unwrap();
        let overrides = || Some(env(&[("RECIPEBOX_API__TIMEOUT_SECS", "5")]));

        let effective = RecipeboxConfig::build(&path, overrides()).unwrap();
        assert_eq!(effective.api.timeout_secs, 5);
        assert_eq!(RecipeboxConfig::load_stored_from(&path).unwrap().api.timeout_secs, 3);

        let stored = RecipeboxConfig::set_stored_at(&path, "explore.trending", "lamb").unwrap();
        assert_eq!(stored.api.timeout_secs, 3);

        let written = RecipeboxConfig::build(&path, None).unwrap();
        assert_eq!(written.api.timeout_secs, 3);
        assert_eq!(written.explore.trending, "lamb");
        assert_eq!(RecipeboxConfig::build(&path, overrides()).unwrap().api.timeout_secs, 5);
    }

    #[test]
    fn test_set_stored_rejects_unknown_key_without_writing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "quiet = true\n").unwrap();

        let err = RecipeboxConfig::set_stored_at(&path, "api.retries", "3").unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "quiet = true\n");
    }

    #[test]
    fn test_get_every_key() {
        let config = RecipeboxConfig::default();
        for key in KEYS {
            assert!(config.get(key).is_ok(), "{key}");
        }
        assert!(matches!(config.get("nope"), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_set_validates_values() {
        let mut config = RecipeboxConfig::default();

        assert!(config.set("api.timeout_secs", "0").is_err());
        assert!(config.set("api.timeout_secs", "ten").is_err());
        assert!(config.set("api.base_url", "ftp://example.com").is_err());
        assert!(config.set("log.level", "loud").is_err());
        assert!(config.set("explore.recommended", "  ").is_err());
        assert!(config.set("quiet", "yes").is_err());
        assert_eq!(config, RecipeboxConfig::default());

        config.set("api.base_url", "http://localhost:8080/api/").unwrap();
        config.set("log.level", "DEBUG").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.get("log.level").unwrap(), "debug");
    }

    #[test]
    fn test_empty_value_clears_path() {
        let mut config = RecipeboxConfig::default();
        config.set("log.file", "/tmp/rb.log").unwrap();
        assert_eq!(config.log_file().unwrap(), PathBuf::from("/tmp/rb.log"));

        config.set("log.file", "").unwrap();
        assert!(config.log.file.is_none());
    }

    #[test]
    fn test_conversions() {
        let mut config = RecipeboxConfig::default();
        config.set("api.timeout_secs", "7").unwrap();
        config.set("explore.trending", "pork").unwrap();

        assert_eq!(config.api_settings().timeout, Duration::from_secs(7));
        assert_eq!(config.explore_queries().trending, "pork");
    }
}
