//! Capability registry for the SmartThings MCP server
//!
//! Maps the native capability vocabularies of SmartThings, Tuya and Lutron
//! onto one unified capability model, and converts attribute values
//! between each platform's representation and the unified one.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use smartthings_mcp_rust::services::{Platform, Registries, UnifiedCapability};
//!
//! let registries = Registries::standard();
//! let capability = registries
//!     .capabilities()
//!     .get_unified_capability(Platform::Tuya, "bright_value");
//! assert_eq!(capability, Some(UnifiedCapability::Dimmer));
//!
//! let level = registries
//!     .conversions()
//!     .from_platform(Platform::Tuya, UnifiedCapability::Dimmer, "level", &json!(750))
//!     .unwrap();
//! assert_eq!(level, json!(75));
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod services;

pub use config::RegistryConfig;
pub use error::{RegistryError, Result};
pub use services::{
    CapabilityRegistry, Platform, Registries, UnifiedCapability, ValueConversionRegistry,
};
