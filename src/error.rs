//! Error types for the capability registry
//!
//! Lookup misses are never errors: the registries answer them with `None`
//! or an identity pass-through. The variants below cover the remaining
//! failure modes, malformed converter input and configuration problems.

use thiserror::Error;

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors raised by converters, configuration loading and identifier parsing
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A converter received a value of the wrong shape
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// An encoded value could not be decoded
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// JSON encoding/decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unrecognized unified capability identifier
    #[error("Unknown capability: {0}")]
    UnknownCapability(String),

    /// Unrecognized platform identifier
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    /// I/O errors while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegistryError {
    /// Create an invalid value error
    pub fn invalid_value<S: Into<String>>(msg: S) -> Self {
        Self::InvalidValue(msg.into())
    }

    /// Create a parsing error
    pub fn parsing<S: Into<String>>(msg: S) -> Self {
        Self::Parsing(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create an unknown capability error
    pub fn unknown_capability<S: Into<String>>(name: S) -> Self {
        Self::UnknownCapability(name.into())
    }

    /// Create an unknown platform error
    pub fn unknown_platform<S: Into<String>>(name: S) -> Self {
        Self::UnknownPlatform(name.into())
    }
}
