//! Project configuration file support for headstat.
//!
//! Loads configuration from `headstat.toml` in the target directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use headstat_logging::LogFormat;

use crate::render::OutputFormat;

/// Project-level configuration loaded from `headstat.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Report output format
    pub format: Option<OutputFormat>,
    /// Search parent directories for the repository
    pub discover: Option<bool>,
    /// Diagnostic logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

/// Configuration for diagnostic logging
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Tracing level filter (e.g. "warn", "debug")
    pub level: Option<String>,
    /// Log format: pretty, json or compact
    pub format: Option<String>,
}

/// The config file name
pub const CONFIG_FILE_NAME: &str = "headstat.toml";

/// Log level used when neither the command line nor the config sets one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

impl ProjectConfig {
    /// Load configuration from the target directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(Some(config))
    }

    /// The configured log format, if any
    pub fn log_format(&self) -> Result<Option<LogFormat>> {
        self.log
            .format
            .as_deref()
            .map(|s| s.parse::<LogFormat>().map_err(anyhow::Error::msg))
            .transpose()
            .with_context(|| format!("Invalid [log].format in {}", CONFIG_FILE_NAME))
    }
}

/// Values given on the command line; `None` means "not given"
#[derive(Debug, Default)]
pub struct Overrides<'a> {
    pub format: Option<OutputFormat>,
    pub discover: bool,
    pub log_level: Option<&'a str>,
    pub log_format: Option<LogFormat>,
}

/// Effective settings for a run
#[derive(Debug, PartialEq, Eq)]
pub struct Settings {
    pub format: OutputFormat,
    pub discover: bool,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Settings {
    /// Merge command line overrides with the project config.
    /// Priority: command line > headstat.toml > defaults
    pub fn resolve(overrides: Overrides<'_>, config: Option<&ProjectConfig>) -> Result<Self> {
        let config_log_format = match config {
            Some(config) => config.log_format()?,
            None => None,
        };

        Ok(Self {
            format: overrides
                .format
                .or(config.and_then(|c| c.format))
                .unwrap_or_default(),
            discover: overrides.discover || config.and_then(|c| c.discover).unwrap_or(false),
            log_level: overrides
                .log_level
                .or(config.and_then(|c| c.log.level.as_deref()))
                .unwrap_or(DEFAULT_LOG_LEVEL)
                .to_string(),
            log_format: overrides
                .log_format
                .or(config_log_format)
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(content: &str) -> ProjectConfig {
        toml::from_str(content).unwrap()
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(ProjectConfig::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_full_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
format = "json"
discover = true

[log]
level = "debug"
format = "compact"
"#,
        )
        .unwrap();

        let config = ProjectConfig::load(dir.path()).unwrap().unwrap();

        assert_eq!(config.format, Some(OutputFormat::Json));
        assert_eq!(config.discover, Some(true));
        assert_eq!(config.log.level.as_deref(), Some("debug"));
        assert_eq!(config.log_format().unwrap(), Some(LogFormat::Compact));
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "format = [").unwrap();

        let err = ProjectConfig::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result = toml::from_str::<ProjectConfig>("colour = true");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_output_format_rejected() {
        let result = toml::from_str::<ProjectConfig>(r#"format = "yaml""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_log_format_is_error() {
        let config = parse("[log]\nformat = \"xml\"");
        assert!(config.log_format().is_err());
        assert!(Settings::resolve(Overrides::default(), Some(&config)).is_err());
    }

    #[test]
    fn test_defaults_without_config() {
        let settings = Settings::resolve(Overrides::default(), None).unwrap();

        assert_eq!(
            settings,
            Settings {
                format: OutputFormat::Pretty,
                discover: false,
                log_level: DEFAULT_LOG_LEVEL.to_string(),
                log_format: LogFormat::Pretty,
            }
        );
    }

    #[test]
    fn test_config_fills_unset_overrides() {
        let config = parse(
            "format = \"json\"\ndiscover = true\n[log]\nlevel = \"info\"\nformat = \"json\"",
        );

        let settings = Settings::resolve(Overrides::default(), Some(&config)).unwrap();

        assert_eq!(settings.format, OutputFormat::Json);
        assert!(settings.discover);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.log_format, LogFormat::Json);
    }

    #[test]
    fn test_command_line_wins_over_config() {
        let config = parse("format = \"json\"\n[log]\nlevel = \"info\"\nformat = \"json\"");
        let overrides = Overrides {
            format: Some(OutputFormat::Pretty),
            discover: false,
            log_level: Some("trace"),
            log_format: Some(LogFormat::Compact),
        };

        let settings = Settings::resolve(overrides, Some(&config)).unwrap();

        assert_eq!(settings.format, OutputFormat::Pretty);
        assert_eq!(settings.log_level, "trace");
        assert_eq!(settings.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_discover_flag_or_config() {
        let config = parse("discover = false");
        let overrides = Overrides {
            discover: true,
            ..Default::default()
        };

        let settings = Settings::resolve(overrides, Some(&config)).unwrap();
        assert!(settings.discover);
    }
}
