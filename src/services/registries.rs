//! Populated registry pair
//!
//! Build one [`Registries`] at startup, then share it read-only
//! (`Arc<Registries>`) with every platform adapter. Nothing registers
//! during live traffic; [`Registries::reinitialize`] exists for tests.

use crate::config::RegistryConfig;
use crate::error::Result;
use crate::services::capability_mappings::{
    register_platform_capabilities, register_platform_conversions,
};
use crate::services::capability_registry::{CapabilityRegistry, PlatformCapabilityMapping};
use crate::services::unified_model::{Platform, UnifiedCapability};
use crate::services::value_conversion::ValueConversionRegistry;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Attribute value translated into unified terms
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnifiedAttributeValue {
    pub capability: UnifiedCapability,
    pub attribute: String,
    pub value: Value,
}

/// Attribute value translated into a platform's native terms
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformAttributeValue {
    pub platform: Platform,
    pub platform_capability: String,
    pub attribute: String,
    pub value: Value,
}

/// Capability and value-conversion registries, populated together
#[derive(Debug, Clone)]
pub struct Registries {
    capabilities: CapabilityRegistry,
    conversions: ValueConversionRegistry,
    platforms: Vec<Platform>,
    extra_mappings: Vec<PlatformCapabilityMapping>,
}

impl Registries {
    /// Standard tables for all platforms
    pub fn standard() -> Self {
        Self::with_platforms(&Platform::ALL)
    }

    /// Standard tables for the given platforms only
    pub fn with_platforms(platforms: &[Platform]) -> Self {
        Self::build(platforms.to_vec(), Vec::new())
    }

    /// Tables selected by configuration, plus its extra mappings
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(
            config.platforms.clone(),
            config.extra_mappings.clone(),
        ))
    }

    fn build(platforms: Vec<Platform>, extra_mappings: Vec<PlatformCapabilityMapping>) -> Self {
        let mut registries = Self {
            capabilities: CapabilityRegistry::new(),
            conversions: ValueConversionRegistry::new(),
            platforms,
            extra_mappings,
        };
        registries.populate();
        registries
    }

    fn populate(&mut self) {
        register_platform_capabilities(&mut self.capabilities, &self.platforms);
        register_platform_conversions(&mut self.conversions, &self.platforms);
        for mapping in &self.extra_mappings {
            self.capabilities.register(mapping.clone());
        }

        info!(
            platforms = ?self.platforms,
            extra = self.extra_mappings.len(),
            "Capability registry initialized: {} mappings, {} value conversions",
            self.capabilities.get_mapping_count(),
            self.conversions.get_conversion_count()
        );
    }

    /// Clear both registries and populate them again from the same sources
    pub fn reinitialize(&mut self) {
        self.capabilities.clear();
        self.conversions.clear();
        self.populate();
    }

    /// Wrap for sharing across threads
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    pub fn conversions(&self) -> &ValueConversionRegistry {
        &self.conversions
    }

    /// Mutable access for test setup
    pub fn capabilities_mut(&mut self) -> &mut CapabilityRegistry {
        &mut self.capabilities
    }

    /// Mutable access for test setup
    pub fn conversions_mut(&mut self) -> &mut ValueConversionRegistry {
        &mut self.conversions
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Translate a platform report into unified terms
    ///
    /// `Ok(None)` when the native capability is unknown for the platform.
    pub fn resolve_from_platform(
        &self,
        platform: Platform,
        platform_capability: &str,
        attribute: &str,
        value: &Value,
    ) -> Result<Option<UnifiedAttributeValue>> {
        let Some(capability) = self
            .capabilities
            .get_unified_capability(platform, platform_capability)
        else {
            return Ok(None);
        };

        let value = self
            .conversions
            .from_platform(platform, capability, attribute, value)?;

        Ok(Some(UnifiedAttributeValue {
            capability,
            attribute: attribute.to_string(),
            value,
        }))
    }

    /// Translate a unified command value for a platform
    ///
    /// `Ok(None)` when the platform has no native name for the capability.
    pub fn prepare_for_platform(
        &self,
        platform: Platform,
        capability: UnifiedCapability,
        attribute: &str,
        value: &Value,
    ) -> Result<Option<PlatformAttributeValue>> {
        let Some(platform_capability) = self.capabilities.get_platform_capability(platform, capability)
        else {
            return Ok(None);
        };

        let value = self
            .conversions
            .to_platform(platform, capability, attribute, value)?;

        Ok(Some(PlatformAttributeValue {
            platform,
            platform_capability: platform_capability.to_string(),
            attribute: attribute.to_string(),
            value,
        }))
    }
}

impl Default for Registries {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_tuya_brightness() {
        let registries = Registries::standard();
        let resolved = registries
            .resolve_from_platform(Platform::Tuya, "bright_value", "level", &json!(750))
            .unwrap()
            .unwrap();
        assert_eq!(resolved.capability, UnifiedCapability::Dimmer);
        assert_eq!(resolved.value, json!(75));
    }

    #[test]
    fn test_unknown_native_capability_resolves_to_none() {
        let registries = Registries::standard();
        assert!(registries
            .resolve_from_platform(Platform::Lutron, "Spectrum", "level", &json!(1))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_prepare_for_unsupported_capability_is_none() {
        let registries = Registries::standard();
        assert!(registries
            .prepare_for_platform(
                Platform::Lutron,
                UnifiedCapability::Color,
                "hue",
                &json!(120)
            )
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_prepare_lutron_level() {
        let registries = Registries::standard();
        let prepared = registries
            .prepare_for_platform(Platform::Lutron, UnifiedCapability::Dimmer, "level", &json!(50))
            .unwrap()
            .unwrap();
        assert_eq!(prepared.platform_capability, "Dimmed");
        assert_eq!(prepared.value, json!(50.0));
    }

    #[test]
    fn test_platform_subset() {
        let registries = Registries::with_platforms(&[Platform::Lutron]);
        assert!(registries
            .capabilities()
            .get_platform_capabilities(Platform::SmartThings)
            .is_empty());
        assert!(!registries
            .conversions()
            .has_conversion(Platform::Tuya, UnifiedCapability::Dimmer, "level"));
        assert!(registries
            .conversions()
            .has_conversion(Platform::Lutron, UnifiedCapability::Dimmer, "level"));
    }
}
