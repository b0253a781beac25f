//! Logger configuration, persistence and environment overrides.
//!
//! Covers:
//! - `Config` and its defaults
//! - `load` / `load_from` / `save_to` (YAML file I/O with atomic write)
//! - XDG-style path helpers (`config_path`, `config_dir`)
//! - `TILDELOG_LEVEL` / `TILDELOG_COLOR` overrides

use crate::error::ConfigError;
use crate::types::{ColorMode, LogLevel, OutputStream};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides [`Config::level`].
pub const LEVEL_ENV_VAR: &str = "TILDELOG_LEVEL";

/// Environment variable that overrides [`Config::color`].
pub const COLOR_ENV_VAR: &str = "TILDELOG_COLOR";

/// Console logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Most verbose severity that is printed
    pub level: LogLevel,
    /// Whether color escapes are written
    pub color: ColorMode,
    /// Stream that receives log lines
    pub stream: OutputStream,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level threshold
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the color mode
    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    /// Set the output stream
    pub fn with_stream(mut self, stream: OutputStream) -> Self {
        self.stream = stream;
        self
    }

    /// Load configuration from the default path, falling back to defaults
    /// when the file does not exist.
    ///
    /// Environment overrides are applied on top of whatever was loaded.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            log::debug!(
                "Config file not found at {:?}, using defaults",
                config_path
            );
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from an explicit YAML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::debug!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml_ng::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("tildelog")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("tildelog")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Apply `TILDELOG_LEVEL` and `TILDELOG_COLOR` from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides using an arbitrary variable lookup.
    ///
    /// Invalid values are logged and ignored; the current setting is kept.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(LEVEL_ENV_VAR) {
            match raw.parse::<LogLevel>() {
                Ok(level) => self.level = level,
                Err(e) => log::warn!("Ignoring {LEVEL_ENV_VAR}: {e}"),
            }
        }
        if let Some(raw) = lookup(COLOR_ENV_VAR) {
            match raw.parse::<ColorMode>() {
                Ok(color) => self.color = color,
                Err(e) => log::warn!("Ignoring {COLOR_ENV_VAR}: {e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.level, LogLevel::Error);
        assert_eq!(config.color, ColorMode::Auto);
        assert_eq!(config.stream, OutputStream::Stdout);
    }

    #[test]
    fn test_config_builders() {
        let config = Config::new()
            .with_level(LogLevel::Debug)
            .with_color(ColorMode::Never)
            .with_stream(OutputStream::Stderr);
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.color, ColorMode::Never);
        assert_eq!(config.stream, OutputStream::Stderr);
    }

    #[test]
    fn test_env_overrides_applied() {
        let mut config = Config::default();
        config.apply_overrides_from(lookup_from(&[
            (LEVEL_ENV_VAR, "info"),
            (COLOR_ENV_VAR, "always"),
        ]));
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.color, ColorMode::Always);
    }

    #[test]
    fn test_invalid_env_override_keeps_current_value() {
        let mut config = Config::new().with_level(LogLevel::Warn);
        config.apply_overrides_from(lookup_from(&[(LEVEL_ENV_VAR, "verbose")]));
        assert_eq!(config.level, LogLevel::Warn);
    }

    #[test]
    fn test_config_path_file_name() {
        let path = Config::config_path();
        assert!(path.ends_with("config.yaml"));
        assert_eq!(path.parent(), Some(Config::config_dir().as_path()));
    }
}
