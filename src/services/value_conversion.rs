//! Value conversion registry
//!
//! Holds converter pairs keyed by (platform, unified capability, attribute).
//! A missing entry means "no conversion needed": `to_platform` and
//! `from_platform` then hand the value back unchanged, so callers never
//! have to ask `has_conversion` first.
//!
//! The registry is a thin dispatcher. Converter errors (for example a
//! malformed encoded color) are returned exactly as the converter raised
//! them.

use crate::error::Result;
use crate::services::unified_model::{Platform, UnifiedCapability};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Pure conversion function over a single attribute value
pub type ConvertFn = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// Converter pair for one (platform, capability, attribute) triple
#[derive(Clone)]
pub struct ValueConversionMapping {
    pub platform: Platform,
    pub unified_capability: UnifiedCapability,
    /// Attribute name, e.g. "level", "hue", "color"
    pub attribute: String,
    /// Unified representation to platform representation
    pub to_platform: ConvertFn,
    /// Platform representation to unified representation
    pub from_platform: ConvertFn,
    pub description: String,
}

impl ValueConversionMapping {
    pub fn new<A, D, T, F>(
        platform: Platform,
        unified_capability: UnifiedCapability,
        attribute: A,
        description: D,
        to_platform: T,
        from_platform: F,
    ) -> Self
    where
        A: Into<String>,
        D: Into<String>,
        T: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            platform,
            unified_capability,
            attribute: attribute.into(),
            to_platform: Arc::new(to_platform),
            from_platform: Arc::new(from_platform),
            description: description.into(),
        }
    }
}

impl fmt::Debug for ValueConversionMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueConversionMapping")
            .field("platform", &self.platform)
            .field("unified_capability", &self.unified_capability)
            .field("attribute", &self.attribute)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

type AttributeConversions = HashMap<String, ValueConversionMapping>;

/// Registry of attribute value converters
#[derive(Debug, Default, Clone)]
pub struct ValueConversionRegistry {
    conversions: HashMap<Platform, HashMap<UnifiedCapability, AttributeConversions>>,
}

impl ValueConversionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the converter pair for the mapping's key
    pub fn register(&mut self, mapping: ValueConversionMapping) {
        debug!(
            platform = %mapping.platform,
            unified = %mapping.unified_capability,
            attribute = %mapping.attribute,
            "Registered value conversion: {}",
            mapping.description
        );

        self.conversions
            .entry(mapping.platform)
            .or_default()
            .entry(mapping.unified_capability)
            .or_default()
            .insert(mapping.attribute.clone(), mapping);
    }

    /// Convert a unified value to the platform representation
    pub fn to_platform(
        &self,
        platform: Platform,
        capability: UnifiedCapability,
        attribute: &str,
        value: &Value,
    ) -> Result<Value> {
        match self.get_conversion(platform, capability, attribute) {
            Some(mapping) => (mapping.to_platform)(value),
            None => {
                trace!(%platform, %capability, attribute, "No conversion registered, passing value through");
                Ok(value.clone())
            }
        }
    }

    /// Convert a platform value to the unified representation
    pub fn from_platform(
        &self,
        platform: Platform,
        capability: UnifiedCapability,
        attribute: &str,
        value: &Value,
    ) -> Result<Value> {
        match self.get_conversion(platform, capability, attribute) {
            Some(mapping) => (mapping.from_platform)(value),
            None => {
                trace!(%platform, %capability, attribute, "No conversion registered, passing value through");
                Ok(value.clone())
            }
        }
    }

    pub fn has_conversion(
        &self,
        platform: Platform,
        capability: UnifiedCapability,
        attribute: &str,
    ) -> bool {
        self.get_conversion(platform, capability, attribute).is_some()
    }

    pub fn get_conversion(
        &self,
        platform: Platform,
        capability: UnifiedCapability,
        attribute: &str,
    ) -> Option<&ValueConversionMapping> {
        self.conversions
            .get(&platform)
            .and_then(|by_capability| by_capability.get(&capability))
            .and_then(|by_attribute| by_attribute.get(attribute))
    }

    /// Iterate over every registered conversion (unordered)
    pub fn conversions(&self) -> impl Iterator<Item = &ValueConversionMapping> {
        self.conversions
            .values()
            .flat_map(|by_capability| by_capability.values())
            .flat_map(|by_attribute| by_attribute.values())
    }

    /// Remove everything. Test isolation only.
    pub fn clear(&mut self) {
        self.conversions.clear();
    }

    pub fn get_conversion_count(&self) -> usize {
        self.conversions().count()
    }
}
