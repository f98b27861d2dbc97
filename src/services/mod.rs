//! Capability and value-conversion services
//!
//! Translates between the unified capability model and the native
//! vocabularies of SmartThings, Tuya and Lutron. Platform adapters
//! consult these registries on every report and command.

pub mod capability_mappings;
pub mod capability_registry;
pub mod coverage;
pub mod registries;
pub mod unified_model;
pub mod value_conversion;
pub mod value_converters;

pub use capability_mappings::{register_standard_capabilities, register_standard_conversions};
pub use capability_registry::{CapabilityRegistry, PlatformCapabilityMapping};
pub use coverage::{capability_gaps, CoverageReport, PlatformCoverage};
pub use registries::{PlatformAttributeValue, Registries, UnifiedAttributeValue};
pub use unified_model::{CapabilityCategory, Platform, UnifiedCapability};
pub use value_conversion::{ConvertFn, ValueConversionMapping, ValueConversionRegistry};
