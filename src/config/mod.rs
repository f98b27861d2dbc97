//! Configuration for registry initialization
//!
//! Decides which platforms get their standard tables loaded and lets
//! deployments add capability mappings without recompiling. Extra
//! mappings are registered after the standard tables, so an extra entry
//! for an existing native name replaces the standard one.
//!
//! ```toml
//! platforms = ["smartthings", "tuya"]
//!
//! [[extra_mappings]]
//! platform = "tuya"
//! platform_capability = "switch_2"
//! unified_capability = "switch"
//! notes = "second gang"
//!
//! [logging]
//! level = "debug"
//! ```

use crate::error::{RegistryError, Result};
use crate::services::capability_registry::PlatformCapabilityMapping;
use crate::services::unified_model::Platform;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable pointing at a TOML config file
pub const CONFIG_PATH_ENV: &str = "SMARTTHINGS_REGISTRY_CONFIG";
/// Comma-separated platform list, e.g. `smartthings,tuya`
pub const PLATFORMS_ENV: &str = "SMARTTHINGS_REGISTRY_PLATFORMS";
pub const LOG_LEVEL_ENV: &str = "SMARTTHINGS_LOG_LEVEL";
pub const LOG_FILE_ENV: &str = "SMARTTHINGS_LOG_FILE";
pub const LOG_JSON_ENV: &str = "SMARTTHINGS_LOG_JSON";

/// Registry configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Platforms whose standard tables are loaded
    pub platforms: Vec<Platform>,

    /// Additional mappings registered after the standard tables
    pub extra_mappings: Vec<PlatformCapabilityMapping>,

    pub logging: LoggingSettings,
}

/// Logging section of the configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set
    pub level: String,

    /// Log file; rotated daily
    pub file_path: Option<PathBuf>,

    /// Emit JSON lines instead of the compact format
    pub json: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            platforms: Platform::ALL.to_vec(),
            extra_mappings: Vec::new(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            json: false,
        }
    }
}

impl RegistryConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RegistryError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| RegistryError::config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| RegistryError::config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Defaults, or the file named by `SMARTTHINGS_REGISTRY_CONFIG`, with
    /// environment overrides applied on top
    pub fn from_env() -> Result<Self> {
        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load_from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(platforms) = env::var(PLATFORMS_ENV) {
            self.platforms = parse_platform_list(&platforms)?;
        }
        if let Ok(level) = env::var(LOG_LEVEL_ENV) {
            self.logging.level = level;
        }
        if let Ok(file) = env::var(LOG_FILE_ENV) {
            self.logging.file_path = Some(PathBuf::from(file));
        }
        if let Ok(json) = env::var(LOG_JSON_ENV) {
            self.logging.json = json.trim().parse().map_err(|_| {
                RegistryError::config(format!(
                    "{LOG_JSON_ENV} must be 'true' or 'false', got '{json}'"
                ))
            })?;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.platforms.is_empty() {
            return Err(RegistryError::config(
                "At least one platform must be enabled",
            ));
        }

        let mut seen = HashSet::new();
        for platform in &self.platforms {
            if !seen.insert(platform) {
                return Err(RegistryError::config(format!(
                    "Platform '{platform}' is listed more than once"
                )));
            }
        }

        for mapping in &self.extra_mappings {
            if mapping.platform_capability.trim().is_empty() {
                return Err(RegistryError::config(format!(
                    "Extra mapping for '{}' on {} has an empty platform capability name",
                    mapping.unified_capability, mapping.platform
                )));
            }
            if !self.platforms.contains(&mapping.platform) {
                return Err(RegistryError::config(format!(
                    "Extra mapping '{}' targets disabled platform {}",
                    mapping.platform_capability, mapping.platform
                )));
            }
        }

        tracing::Level::from_str(&self.logging.level).map_err(|_| {
            RegistryError::config(format!("Invalid log level '{}'", self.logging.level))
        })?;

        Ok(())
    }
}

fn parse_platform_list(raw: &str) -> Result<Vec<Platform>> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(Platform::from_str)
        .collect()
}
