//! Unified capability model and platform identifiers
//!
//! The unified capability set is closed: adding a capability is a schema
//! change, not a runtime registration. Platforms are closed as well, but
//! everything keyed by them lives in the registries, so a new platform
//! needs only a new variant plus its mapping table.

use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse grouping of unified capabilities
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityCategory {
    /// Actuators the user commands
    Control,
    /// Read-only measurements and events
    Sensor,
    /// Multi-function devices
    Composite,
}

impl CapabilityCategory {
    pub const ALL: [CapabilityCategory; 3] = [
        CapabilityCategory::Control,
        CapabilityCategory::Sensor,
        CapabilityCategory::Composite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityCategory::Control => "control",
            CapabilityCategory::Sensor => "sensor",
            CapabilityCategory::Composite => "composite",
        }
    }
}

impl fmt::Display for CapabilityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform-independent device function
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum UnifiedCapability {
    // Control capabilities
    Switch,
    Dimmer,
    Color,
    ColorTemperature,
    Thermostat,
    Lock,
    Shade,
    Fan,
    Valve,
    Alarm,
    DoorControl,

    // Sensor capabilities
    TemperatureSensor,
    HumiditySensor,
    MotionSensor,
    ContactSensor,
    OccupancySensor,
    IlluminanceSensor,
    Battery,
    AirQualitySensor,
    WaterLeakSensor,
    SmokeDetector,
    Button,
    PressureSensor,
    CoDetector,
    SoundSensor,

    // Composite capabilities
    EnergyMeter,
    Speaker,
    MediaPlayer,
    Camera,
    RobotVacuum,
    IrBlaster,
}

impl UnifiedCapability {
    /// Every unified capability, in declaration order
    pub const ALL: [UnifiedCapability; 31] = [
        UnifiedCapability::Switch,
        UnifiedCapability::Dimmer,
        UnifiedCapability::Color,
        UnifiedCapability::ColorTemperature,
        UnifiedCapability::Thermostat,
        UnifiedCapability::Lock,
        UnifiedCapability::Shade,
        UnifiedCapability::Fan,
        UnifiedCapability::Valve,
        UnifiedCapability::Alarm,
        UnifiedCapability::DoorControl,
        UnifiedCapability::TemperatureSensor,
        UnifiedCapability::HumiditySensor,
        UnifiedCapability::MotionSensor,
        UnifiedCapability::ContactSensor,
        UnifiedCapability::OccupancySensor,
        UnifiedCapability::IlluminanceSensor,
        UnifiedCapability::Battery,
        UnifiedCapability::AirQualitySensor,
        UnifiedCapability::WaterLeakSensor,
        UnifiedCapability::SmokeDetector,
        UnifiedCapability::Button,
        UnifiedCapability::PressureSensor,
        UnifiedCapability::CoDetector,
        UnifiedCapability::SoundSensor,
        UnifiedCapability::EnergyMeter,
        UnifiedCapability::Speaker,
        UnifiedCapability::MediaPlayer,
        UnifiedCapability::Camera,
        UnifiedCapability::RobotVacuum,
        UnifiedCapability::IrBlaster,
    ];

    /// Wire name, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            UnifiedCapability::Switch => "switch",
            UnifiedCapability::Dimmer => "dimmer",
            UnifiedCapability::Color => "color",
            UnifiedCapability::ColorTemperature => "color_temperature",
            UnifiedCapability::Thermostat => "thermostat",
            UnifiedCapability::Lock => "lock",
            UnifiedCapability::Shade => "shade",
            UnifiedCapability::Fan => "fan",
            UnifiedCapability::Valve => "valve",
            UnifiedCapability::Alarm => "alarm",
            UnifiedCapability::DoorControl => "door_control",
            UnifiedCapability::TemperatureSensor => "temperature_sensor",
            UnifiedCapability::HumiditySensor => "humidity_sensor",
            UnifiedCapability::MotionSensor => "motion_sensor",
            UnifiedCapability::ContactSensor => "contact_sensor",
            UnifiedCapability::OccupancySensor => "occupancy_sensor",
            UnifiedCapability::IlluminanceSensor => "illuminance_sensor",
            UnifiedCapability::Battery => "battery",
            UnifiedCapability::AirQualitySensor => "air_quality_sensor",
            UnifiedCapability::WaterLeakSensor => "water_leak_sensor",
            UnifiedCapability::SmokeDetector => "smoke_detector",
            UnifiedCapability::Button => "button",
            UnifiedCapability::PressureSensor => "pressure_sensor",
            UnifiedCapability::CoDetector => "co_detector",
            UnifiedCapability::SoundSensor => "sound_sensor",
            UnifiedCapability::EnergyMeter => "energy_meter",
            UnifiedCapability::Speaker => "speaker",
            UnifiedCapability::MediaPlayer => "media_player",
            UnifiedCapability::Camera => "camera",
            UnifiedCapability::RobotVacuum => "robot_vacuum",
            UnifiedCapability::IrBlaster => "ir_blaster",
        }
    }

    pub fn category(&self) -> CapabilityCategory {
        use UnifiedCapability::*;
        match self {
            Switch | Dimmer | Color | ColorTemperature | Thermostat | Lock | Shade | Fan
            | Valve | Alarm | DoorControl => CapabilityCategory::Control,
            TemperatureSensor | HumiditySensor | MotionSensor | ContactSensor
            | OccupancySensor | IlluminanceSensor | Battery | AirQualitySensor
            | WaterLeakSensor | SmokeDetector | Button | PressureSensor | CoDetector
            | SoundSensor => CapabilityCategory::Sensor,
            EnergyMeter | Speaker | MediaPlayer | Camera | RobotVacuum | IrBlaster => {
                CapabilityCategory::Composite
            }
        }
    }

    /// All capabilities belonging to a category
    pub fn in_category(category: CapabilityCategory) -> impl Iterator<Item = UnifiedCapability> {
        Self::ALL
            .into_iter()
            .filter(move |capability| capability.category() == category)
    }
}

impl fmt::Display for UnifiedCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnifiedCapability {
    type Err = RegistryError;

    /// Accepts the wire name in any case, with `-` or `_` separators
    /// (`door_control`, `DOOR_CONTROL`, `door-control`).
    fn from_str(s: &str) -> Result<Self> {
        let normalized = normalize_identifier(s);
        Self::ALL
            .into_iter()
            .find(|capability| capability.as_str() == normalized)
            .ok_or_else(|| RegistryError::unknown_capability(s))
    }
}

/// Supported device ecosystem
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    SmartThings,
    Tuya,
    Lutron,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::SmartThings, Platform::Tuya, Platform::Lutron];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::SmartThings => "smartthings",
            Platform::Tuya => "tuya",
            Platform::Lutron => "lutron",
        }
    }

    /// Human-readable vendor name
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::SmartThings => "SmartThings",
            Platform::Tuya => "Tuya",
            Platform::Lutron => "Lutron",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = normalize_identifier(s).replace('_', "");
        Self::ALL
            .into_iter()
            .find(|platform| platform.as_str() == normalized)
            .ok_or_else(|| RegistryError::unknown_platform(s))
    }
}

fn normalize_identifier(s: &str) -> String {
    s.trim().to_lowercase().replace('-', "_")
}
