//! Logging setup
//!
//! Builds a `tracing` subscriber from [`LogConfig`]: an env filter
//! (`RUST_LOG` wins over the configured level), an optional stderr layer
//! and an optional daily-rotated log file. Output is either compact text
//! or JSON lines.

use crate::config::LoggingSettings;
use crate::error::{RegistryError, Result};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default level
    pub level: Level,

    /// Log to file
    pub file_path: Option<PathBuf>,

    /// Log to stderr
    pub stderr: bool,

    /// JSON lines instead of compact text
    pub json: bool,

    /// Include thread IDs
    pub thread_ids: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            file_path: None,
            stderr: true,
            json: false,
            thread_ids: false,
        }
    }
}

impl LogConfig {
    /// Build from the `[logging]` configuration section
    pub fn from_settings(settings: &LoggingSettings) -> Result<Self> {
        let level = Level::from_str(&settings.level)
            .map_err(|_| RegistryError::config(format!("Invalid log level '{}'", settings.level)))?;

        Ok(Self {
            level,
            file_path: settings.file_path.clone(),
            json: settings.json,
            ..Self::default()
        })
    }

    /// Force debug level, as the `--debug` flag does
    pub fn with_debug(mut self, debug: bool) -> Self {
        if debug {
            self.level = Level::DEBUG;
        }
        self
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: LogConfig) -> Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(config.level.into())
        .from_env_lossy();

    let mut layers: Vec<BoxedLayer> = Vec::new();

    if config.stderr {
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(config.thread_ids);
        layers.push(if config.json {
            layer.json().boxed()
        } else {
            layer.compact().boxed()
        });
    }

    if let Some(file_path) = &config.file_path {
        let directory = file_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| std::path::Path::new("."));
        std::fs::create_dir_all(directory)?;

        let file_name = file_path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("smartthings-registry.log"));
        let file_appender = tracing_appender::rolling::daily(directory, file_name);

        let layer = fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_thread_ids(config.thread_ids);
        layers.push(if config.json {
            layer.json().boxed()
        } else {
            layer.boxed()
        });
    }

    tracing_subscriber::registry()
        .with(layers.with_filter(env_filter))
        .try_init()
        .map_err(|e| RegistryError::config(format!("Failed to initialize logging: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings() {
        let settings = LoggingSettings {
            level: "warn".to_string(),
            file_path: Some(PathBuf::from("/tmp/registry.log")),
            json: true,
        };
        let config = LogConfig::from_settings(&settings).unwrap();
        assert_eq!(config.level, Level::WARN);
        assert!(config.json);
        assert!(config.stderr);
        assert_eq!(config.file_path, Some(PathBuf::from("/tmp/registry.log")));
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let settings = LoggingSettings {
            level: "chatty".to_string(),
            ..LoggingSettings::default()
        };
        assert!(LogConfig::from_settings(&settings).is_err());
    }

    #[test]
    fn test_debug_flag_overrides_level() {
        let config = LogConfig::default().with_debug(true);
        assert_eq!(config.level, Level::DEBUG);
        let config = LogConfig::default().with_debug(false);
        assert_eq!(config.level, Level::INFO);
    }
}
