use crate::constants;
use crate::error::{CleanerError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub pattern: String,
    pub calendar_year: i32,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    /// Enables JSON file logs with daily rotation under this directory
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricsConfig {
    /// Prometheus text snapshot written at the end of the run
    pub textfile: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(constants::DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(constants::DEFAULT_OUTPUT_DIR),
            pattern: constants::BATCH_PATTERN.to_string(),
            calendar_year: constants::DEFAULT_CALENDAR_YEAR,
            logging: LoggingConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Config {
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            CleanerError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `config_path` when given, otherwise fall back to defaults.
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.pattern.trim().is_empty() {
            return Err(CleanerError::Config("pattern must not be empty".to_string()));
        }
        if self.pattern.contains('/') || self.pattern.contains('\\') {
            return Err(CleanerError::Config(format!(
                "pattern '{}' must be a file name pattern, not a path",
                self.pattern
            )));
        }
        if !(1..=9999).contains(&self.calendar_year) {
            return Err(CleanerError::Config(format!(
                "calendar_year {} is out of range",
                self.calendar_year
            )));
        }
        Ok(())
    }
}
