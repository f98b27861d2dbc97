//! Per-platform capability coverage
//!
//! Coverage is the share of the unified capability set a platform reaches
//! through at least one registered mapping.

use crate::services::capability_registry::CapabilityRegistry;
use crate::services::unified_model::{CapabilityCategory, Platform, UnifiedCapability};
use crate::services::value_conversion::ValueConversionRegistry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Coverage of one platform
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformCoverage {
    pub platform: Platform,
    pub supported: Vec<UnifiedCapability>,
    pub supported_count: usize,
    pub total: usize,
    /// 0.0 - 100.0
    pub percentage: f64,
    pub missing_by_category: BTreeMap<CapabilityCategory, Vec<UnifiedCapability>>,
}

impl PlatformCoverage {
    pub fn compute(registry: &CapabilityRegistry, platform: Platform) -> Self {
        let supported = registry.get_supported_capabilities(platform);
        let total = UnifiedCapability::ALL.len();

        let mut missing_by_category: BTreeMap<CapabilityCategory, Vec<UnifiedCapability>> =
            BTreeMap::new();
        for capability in UnifiedCapability::ALL {
            if !supported.contains(&capability) {
                missing_by_category
                    .entry(capability.category())
                    .or_default()
                    .push(capability);
            }
        }

        Self {
            platform,
            supported_count: supported.len(),
            total,
            percentage: supported.len() as f64 * 100.0 / total as f64,
            supported: supported.into_iter().collect(),
            missing_by_category,
        }
    }

    pub fn missing(&self) -> impl Iterator<Item = UnifiedCapability> + '_ {
        self.missing_by_category.values().flatten().copied()
    }

    pub fn is_complete(&self) -> bool {
        self.supported_count == self.total
    }
}

/// Coverage of every platform with registered mappings
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    pub generated_at: DateTime<Utc>,
    pub mapping_count: usize,
    pub conversion_count: usize,
    pub platforms: Vec<PlatformCoverage>,
}

impl CoverageReport {
    /// Build the report for the given platforms
    pub fn generate(
        capabilities: &CapabilityRegistry,
        conversions: &ValueConversionRegistry,
        platforms: &[Platform],
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            mapping_count: capabilities.get_mapping_count(),
            conversion_count: conversions.get_conversion_count(),
            platforms: platforms
                .iter()
                .map(|platform| PlatformCoverage::compute(capabilities, *platform))
                .collect(),
        }
    }

    pub fn platform(&self, platform: Platform) -> Option<&PlatformCoverage> {
        self.platforms.iter().find(|c| c.platform == platform)
    }
}

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Capability coverage ({} mappings, {} value conversions)",
            self.mapping_count, self.conversion_count
        )?;
        writeln!(f, "Generated: {}", self.generated_at.to_rfc3339())?;

        for coverage in &self.platforms {
            writeln!(f)?;
            writeln!(
                f,
                "{:<12} {:>2}/{} ({:.1}%)",
                coverage.platform.display_name(),
                coverage.supported_count,
                coverage.total,
                coverage.percentage
            )?;
            for (category, missing) in &coverage.missing_by_category {
                let names: Vec<&str> = missing.iter().map(|c| c.as_str()).collect();
                writeln!(f, "  missing {:<9} {}", category.as_str(), names.join(", "))?;
            }
        }
        Ok(())
    }
}

/// Capabilities `a` supports that `b` does not
pub fn capability_gaps(
    registry: &CapabilityRegistry,
    a: Platform,
    b: Platform,
) -> BTreeSet<UnifiedCapability> {
    let supported_by_b = registry.get_supported_capabilities(b);
    registry
        .get_supported_capabilities(a)
        .into_iter()
        .filter(|capability| !supported_by_b.contains(capability))
        .collect()
}
