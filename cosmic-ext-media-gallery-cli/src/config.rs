//! Gallery Tool Configuration
//!
//! Configuration management for the `cosmic-ext-gallery` tool.

use anyhow::{Context, Result};
use chrono::FixedOffset;
use cosmic_ext_media_gallery::parse_utc_offset;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "gallery.toml";

/// Tool configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Calendar configuration
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    #[serde(default = "default_true")]
    pub pretty: bool,
}

/// Calendar configuration
///
/// Sections are computed on UTC calendar days unless an offset is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Fixed UTC offset of the calendar, e.g. "+02:00"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_true(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl CalendarConfig {
    /// Parsed calendar offset, `None` meaning UTC
    pub fn offset(&self) -> Result<Option<FixedOffset>> {
        self.utc_offset
            .as_deref()
            .map(parse_utc_offset)
            .transpose()
            .context("Invalid calendar.utc_offset in config")
    }
}

impl Config {
    /// Default configuration file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("cosmic")
            .join("cosmic-ext-gallery")
            .join(CONFIG_FILE_NAME)
    }

    /// Load configuration from `path`, creating a default file if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path).context("Failed to read config file")?;
            let config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.output.pretty);
        assert!(config.calendar.utc_offset.is_none());
        assert_eq!(config.logging.level, "warn");
        assert!(config.calendar.offset().unwrap().is_none());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.calendar.utc_offset = Some("+02:00".to_string());

        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.calendar.utc_offset.as_deref(), Some("+02:00"));
        assert_eq!(
            parsed.calendar.offset().unwrap().unwrap().local_minus_utc(),
            7200
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = toml::from_str("[output]\npretty = false\n").unwrap();
        assert!(!parsed.output.pretty);
        assert_eq!(parsed.logging.level, "warn");

        let parsed: Config = toml::from_str("").unwrap();
        assert!(parsed.output.pretty);
    }

    #[test]
    fn test_invalid_offset() {
        let config = Config {
            calendar: CalendarConfig {
                utc_offset: Some("somewhere".to_string()),
            },
            ..Default::default()
        };
        assert!(config.calendar.offset().is_err());
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert!(config.output.pretty);

        let mut changed = config.clone();
        changed.output.pretty = false;
        changed.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert!(!reloaded.output.pretty);
    }

    #[test]
    fn test_default_path_file_name() {
        assert!(Config::default_path().ends_with(CONFIG_FILE_NAME));
    }
}
