use crate::config::LoggingConfig;
use crate::error::{CleanerError, Result};
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes console logging, plus JSON file logging when a directory is configured.
///
/// The returned guard flushes the file writer on drop; hold it until the run ends.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level).map_err(|e| {
        CleanerError::Config(format!("invalid log level '{}': {}", config.level, e))
    })?;

    let console_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &config.directory {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::daily(dir, "campaign_cleaner.log");
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().json().with_writer(non_blocking_writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| CleanerError::Config(format!("logging already initialized: {e}")))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_level_is_config_error() {
        let config = LoggingConfig {
            level: "campaign_cleaner=notalevel".to_string(),
            directory: None,
        };
        assert!(matches!(
            init_logging(&config),
            Err(CleanerError::Config(_))
        ));
    }
}
