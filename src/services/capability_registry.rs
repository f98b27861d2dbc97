//! Platform capability registry
//!
//! Maps platform-native capability names (SmartThings `switchLevel`, Tuya
//! `bright_value`, Lutron `Dimmed`, ...) onto the unified capability model
//! and back. Lookups are two-level: platform first, then the native name
//! or unified capability.
//!
//! Registration is last-write-wins in both directions. Several native
//! names may alias the same unified capability; the reverse lookup then
//! only remembers the most recently registered one. Use
//! [`CapabilityRegistry::get_platform_aliases`] to see all of them.

use crate::services::unified_model::{Platform, UnifiedCapability};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

/// Association between one platform-native capability and a unified capability
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlatformCapabilityMapping {
    /// Source platform
    pub platform: Platform,
    /// Platform-native capability identifier
    pub platform_capability: String,
    /// Target unified capability
    pub unified_capability: UnifiedCapability,
    /// Whether attribute values need conversion for this mapping
    #[serde(default)]
    pub requires_value_conversion: bool,
    /// Free-text notes
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub deprecation_message: Option<String>,
}

impl PlatformCapabilityMapping {
    pub fn new<S: Into<String>>(
        platform: Platform,
        platform_capability: S,
        unified_capability: UnifiedCapability,
    ) -> Self {
        Self {
            platform,
            platform_capability: platform_capability.into(),
            unified_capability,
            requires_value_conversion: false,
            notes: String::new(),
            deprecated: false,
            deprecation_message: None,
        }
    }

    /// Mark the mapping as needing value conversion
    pub fn with_conversion(mut self) -> Self {
        self.requires_value_conversion = true;
        self
    }

    pub fn with_notes<S: Into<String>>(mut self, notes: S) -> Self {
        self.notes = notes.into();
        self
    }

    /// Mark the mapping deprecated. Lookups keep working.
    pub fn deprecated<S: Into<String>>(mut self, message: S) -> Self {
        self.deprecated = true;
        self.deprecation_message = Some(message.into());
        self
    }
}

#[derive(Debug, Clone)]
struct RegisteredMapping {
    sequence: u64,
    mapping: PlatformCapabilityMapping,
}

/// Bidirectional registry between platform-native and unified capabilities
#[derive(Debug, Default, Clone)]
pub struct CapabilityRegistry {
    /// platform -> native name -> mapping
    forward: HashMap<Platform, HashMap<String, RegisteredMapping>>,
    /// platform -> unified capability -> most recently registered native name
    reverse: HashMap<Platform, HashMap<UnifiedCapability, String>>,
    next_sequence: u64,
}

impl CapabilityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mapping, overwriting any previous entry for the same keys
    pub fn register(&mut self, mapping: PlatformCapabilityMapping) {
        if mapping.deprecated {
            warn!(
                platform = %mapping.platform,
                capability = %mapping.platform_capability,
                unified = %mapping.unified_capability,
                "Registering deprecated capability mapping: {}",
                mapping
                    .deprecation_message
                    .as_deref()
                    .unwrap_or("no deprecation message")
            );
        }

        debug!(
            platform = %mapping.platform,
            capability = %mapping.platform_capability,
            unified = %mapping.unified_capability,
            "Registered capability mapping"
        );

        self.reverse
            .entry(mapping.platform)
            .or_default()
            .insert(mapping.unified_capability, mapping.platform_capability.clone());

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.forward.entry(mapping.platform).or_default().insert(
            mapping.platform_capability.clone(),
            RegisteredMapping { sequence, mapping },
        );
    }

    /// Forward lookup: what a platform-native name means in unified terms
    pub fn get_unified_capability(
        &self,
        platform: Platform,
        platform_capability: &str,
    ) -> Option<UnifiedCapability> {
        self.get_mapping(platform, platform_capability)
            .map(|mapping| mapping.unified_capability)
    }

    /// Reverse lookup: what the platform calls a unified capability
    ///
    /// With several aliases registered, returns the last one registered.
    pub fn get_platform_capability(
        &self,
        platform: Platform,
        capability: UnifiedCapability,
    ) -> Option<&str> {
        self.reverse
            .get(&platform)
            .and_then(|by_capability| by_capability.get(&capability))
            .map(String::as_str)
    }

    /// True iff a reverse entry exists for the pair
    ///
    /// Re-registering a native name under another capability leaves the old
    /// reverse entry in place, so this can still report a capability that
    /// [`get_supported_capabilities`](Self::get_supported_capabilities) no
    /// longer lists. Only [`clear`](Self::clear) drops reverse entries.
    pub fn is_platform_supported(&self, platform: Platform, capability: UnifiedCapability) -> bool {
        self.get_platform_capability(platform, capability).is_some()
    }

    /// Unified capabilities reachable from any forward entry of the platform
    pub fn get_supported_capabilities(&self, platform: Platform) -> BTreeSet<UnifiedCapability> {
        self.platform_entries(platform)
            .map(|entry| entry.mapping.unified_capability)
            .collect()
    }

    /// All platform-native names registered for the platform
    pub fn get_platform_capabilities(&self, platform: Platform) -> BTreeSet<String> {
        self.forward
            .get(&platform)
            .map(|by_name| by_name.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Every native name currently mapping to the unified capability, oldest registration first
    pub fn get_platform_aliases(
        &self,
        platform: Platform,
        capability: UnifiedCapability,
    ) -> Vec<&str> {
        let mut aliases: Vec<&RegisteredMapping> = self
            .platform_entries(platform)
            .filter(|entry| entry.mapping.unified_capability == capability)
            .collect();
        aliases.sort_by_key(|entry| entry.sequence);
        aliases
            .into_iter()
            .map(|entry| entry.mapping.platform_capability.as_str())
            .collect()
    }

    /// Full registered record, including notes and deprecation
    pub fn get_mapping(
        &self,
        platform: Platform,
        platform_capability: &str,
    ) -> Option<&PlatformCapabilityMapping> {
        self.forward
            .get(&platform)
            .and_then(|by_name| by_name.get(platform_capability))
            .map(|entry| &entry.mapping)
    }

    /// All records for a platform, in registration order
    pub fn platform_mappings(&self, platform: Platform) -> Vec<&PlatformCapabilityMapping> {
        let mut entries: Vec<&RegisteredMapping> = self.platform_entries(platform).collect();
        entries.sort_by_key(|entry| entry.sequence);
        entries.into_iter().map(|entry| &entry.mapping).collect()
    }

    /// Iterate over every registered record (unordered)
    pub fn mappings(&self) -> impl Iterator<Item = &PlatformCapabilityMapping> {
        self.forward
            .values()
            .flat_map(|by_name| by_name.values())
            .map(|entry| &entry.mapping)
    }

    /// Remove everything. Test isolation only.
    pub fn clear(&mut self) {
        self.forward.clear();
        self.reverse.clear();
        self.next_sequence = 0;
    }

    /// Total number of forward entries
    pub fn get_mapping_count(&self) -> usize {
        self.forward.values().map(HashMap::len).sum()
    }

    fn platform_entries(&self, platform: Platform) -> impl Iterator<Item = &RegisteredMapping> {
        self.forward
            .get(&platform)
            .into_iter()
            .flat_map(|by_name| by_name.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn warn_lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .filter(|line| line.contains("WARN"))
                .map(str::to_string)
                .collect()
        }
    }

    fn with_captured_warnings(f: impl FnOnce()) -> Vec<String> {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        logs.warn_lines()
    }

    fn door_registry() -> CapabilityRegistry {
        let mut registry = CapabilityRegistry::new();
        registry.register(PlatformCapabilityMapping::new(
            Platform::SmartThings,
            "doorControl",
            UnifiedCapability::DoorControl,
        ));
        registry.register(PlatformCapabilityMapping::new(
            Platform::SmartThings,
            "garageDoorControl",
            UnifiedCapability::DoorControl,
        ));
        registry
    }

    #[test]
    fn test_forward_lookup() {
        let registry = door_registry();
        assert_eq!(
            registry.get_unified_capability(Platform::SmartThings, "doorControl"),
            Some(UnifiedCapability::DoorControl)
        );
        assert_eq!(registry.get_unified_capability(Platform::SmartThings, "nope"), None);
        assert_eq!(registry.get_unified_capability(Platform::Tuya, "doorControl"), None);
    }

    #[test]
    fn test_reverse_lookup_keeps_last_alias() {
        let registry = door_registry();
        assert_eq!(
            registry.get_platform_capability(Platform::SmartThings, UnifiedCapability::DoorControl),
            Some("garageDoorControl")
        );
        assert_eq!(
            registry.get_platform_aliases(Platform::SmartThings, UnifiedCapability::DoorControl),
            vec!["doorControl", "garageDoorControl"]
        );
    }

    #[test]
    fn test_reregistering_overwrites() {
        let mut registry = door_registry();
        registry.register(
            PlatformCapabilityMapping::new(
                Platform::SmartThings,
                "doorControl",
                UnifiedCapability::Lock,
            )
            .with_notes("remapped"),
        );

        assert_eq!(registry.get_mapping_count(), 2);
        assert_eq!(
            registry.get_unified_capability(Platform::SmartThings, "doorControl"),
            Some(UnifiedCapability::Lock)
        );
        assert_eq!(
            registry
                .get_mapping(Platform::SmartThings, "doorControl")
                .map(|m| m.notes.as_str()),
            Some("remapped")
        );
        assert_eq!(
            registry.get_platform_aliases(Platform::SmartThings, UnifiedCapability::DoorControl),
            vec!["garageDoorControl"]
        );
    }

    #[test]
    fn test_deprecated_registration_warns() {
        let mut registry = CapabilityRegistry::new();

        let warnings = with_captured_warnings(|| {
            registry.register(
                PlatformCapabilityMapping::new(
                    Platform::SmartThings,
                    "thermostat",
                    UnifiedCapability::Thermostat,
                )
                .deprecated("use thermostatMode"),
            );
        });
        assert_eq!(warnings.len(), 1, "{warnings:?}");
        assert!(warnings[0].contains("capability=thermostat"));
        assert!(warnings[0].contains("platform=smartthings"));
        assert!(warnings[0].contains("use thermostatMode"));

        let warnings = with_captured_warnings(|| {
            registry.register(PlatformCapabilityMapping::new(
                Platform::SmartThings,
                "thermostatMode",
                UnifiedCapability::Thermostat,
            ));
        });
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn test_remapped_name_leaves_stale_reverse_entry() {
        let mut registry = CapabilityRegistry::new();
        registry.register(PlatformCapabilityMapping::new(
            Platform::Lutron,
            "Pico",
            UnifiedCapability::Button,
        ));
        registry.register(PlatformCapabilityMapping::new(
            Platform::Lutron,
            "Pico",
            UnifiedCapability::Switch,
        ));

        assert!(registry.is_platform_supported(Platform::Lutron, UnifiedCapability::Button));
        assert!(!registry
            .get_supported_capabilities(Platform::Lutron)
            .contains(&UnifiedCapability::Button));

        registry.clear();
        assert!(!registry.is_platform_supported(Platform::Lutron, UnifiedCapability::Button));
    }

    #[test]
    fn test_deprecated_mapping_still_resolves() {
        let mut registry = CapabilityRegistry::new();
        registry.register(
            PlatformCapabilityMapping::new(
                Platform::SmartThings,
                "thermostat",
                UnifiedCapability::Thermostat,
            )
            .deprecated("use thermostatMode"),
        );

        assert_eq!(
            registry.get_unified_capability(Platform::SmartThings, "thermostat"),
            Some(UnifiedCapability::Thermostat)
        );
        assert!(registry.is_platform_supported(Platform::SmartThings, UnifiedCapability::Thermostat));
        let mapping = registry.get_mapping(Platform::SmartThings, "thermostat").unwrap();
        assert!(mapping.deprecated);
        assert_eq!(mapping.deprecation_message.as_deref(), Some("use thermostatMode"));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut registry = door_registry();
        registry.clear();
        assert_eq!(registry.get_mapping_count(), 0);
        assert!(registry.get_platform_capabilities(Platform::SmartThings).is_empty());
        assert!(!registry.is_platform_supported(Platform::SmartThings, UnifiedCapability::DoorControl));
    }

    #[test]
    fn test_mapping_deserializes_with_defaults() {
        let mapping: PlatformCapabilityMapping = serde_json::from_value(serde_json::json!({
            "platform": "tuya",
            "platform_capability": "switch_2",
            "unified_capability": "switch"
        }))
        .unwrap();
        assert_eq!(
            mapping,
            PlatformCapabilityMapping::new(Platform::Tuya, "switch_2", UnifiedCapability::Switch)
        );
    }
}
