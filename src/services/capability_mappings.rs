//! Standard capability mappings and value conversions
//!
//! Registration order matters: when several native names alias one
//! unified capability, the last one registered wins the reverse lookup.

use crate::services::capability_registry::{CapabilityRegistry, PlatformCapabilityMapping};
use crate::services::unified_model::{Platform, UnifiedCapability, UnifiedCapability as U};
use crate::services::value_conversion::{ValueConversionMapping, ValueConversionRegistry};
use crate::services::value_converters;
use tracing::info;

fn st(name: &str, capability: UnifiedCapability) -> PlatformCapabilityMapping {
    PlatformCapabilityMapping::new(Platform::SmartThings, name, capability)
}

fn tuya(code: &str, capability: UnifiedCapability) -> PlatformCapabilityMapping {
    PlatformCapabilityMapping::new(Platform::Tuya, code, capability)
}

fn lutron(zone_type: &str, capability: UnifiedCapability) -> PlatformCapabilityMapping {
    PlatformCapabilityMapping::new(Platform::Lutron, zone_type, capability)
}

/// SmartThings capability ids
pub fn smartthings_mappings() -> Vec<PlatformCapabilityMapping> {
    vec![
        // Control
        st("switch", U::Switch).with_notes("on/off"),
        st("switchLevel", U::Dimmer).with_notes("level 0-100, same range as unified"),
        st("colorControl", U::Color)
            .with_conversion()
            .with_notes("hue is a 0-100 percentage, saturation 0-100"),
        st("colorTemperature", U::ColorTemperature).with_notes("kelvin"),
        st("thermostatHeatingSetpoint", U::Thermostat),
        st("thermostatCoolingSetpoint", U::Thermostat),
        st("thermostat", U::Thermostat)
            .deprecated("SmartThings split 'thermostat' into thermostatMode and setpoint capabilities"),
        st("thermostatMode", U::Thermostat).with_notes("heat/cool/auto/off"),
        st("lock", U::Lock),
        st("windowShade", U::Shade).with_notes("open/close/pause"),
        st("windowShadeLevel", U::Shade).with_notes("shade position 0-100"),
        st("fanSpeed", U::Fan).with_notes("discrete speed 0-4"),
        st("valve", U::Valve),
        st("alarm", U::Alarm).with_notes("siren/strobe/both/off"),
        st("doorControl", U::DoorControl),
        st("garageDoorControl", U::DoorControl)
            .with_notes("aliases doorControl; wins the reverse lookup"),
        // Sensors
        st("temperatureMeasurement", U::TemperatureSensor),
        st("relativeHumidityMeasurement", U::HumiditySensor),
        st("motionSensor", U::MotionSensor),
        st("contactSensor", U::ContactSensor),
        st("presenceSensor", U::OccupancySensor),
        st("occupancySensor", U::OccupancySensor),
        st("illuminanceMeasurement", U::IlluminanceSensor).with_notes("lux"),
        st("battery", U::Battery).with_notes("percent"),
        st("airQualitySensor", U::AirQualitySensor),
        st("waterSensor", U::WaterLeakSensor),
        st("smokeDetector", U::SmokeDetector),
        st("button", U::Button),
        st("atmosphericPressureMeasurement", U::PressureSensor),
        st("carbonMonoxideDetector", U::CoDetector),
        st("soundSensor", U::SoundSensor),
        // Composite
        st("powerMeter", U::EnergyMeter).with_notes("instantaneous watts"),
        st("energyMeter", U::EnergyMeter).with_notes("cumulative kWh"),
        st("audioVolume", U::Speaker),
        st("mediaPlayback", U::MediaPlayer),
        st("videoStream", U::Camera),
        st("robotCleanerMovement", U::RobotVacuum),
    ]
}

/// Tuya standard instruction codes
pub fn tuya_mappings() -> Vec<PlatformCapabilityMapping> {
    vec![
        // Control
        tuya("switch_1", U::Switch).with_notes("first gang of multi-gang switches"),
        tuya("switch", U::Switch),
        tuya("switch_led", U::Switch).with_notes("light on/off"),
        tuya("bright_value", U::Dimmer)
            .with_conversion()
            .with_notes("brightness 0-1000"),
        tuya("colour_data", U::Color)
            .with_conversion()
            .with_notes("JSON string {h, s, v} with v in 0-255"),
        tuya("temp_value", U::ColorTemperature),
        tuya("temp_set", U::Thermostat).with_notes("target temperature"),
        tuya("lock_motor_state", U::Lock),
        tuya("percent_control", U::Shade).with_notes("curtain position 0-100"),
        tuya("fan_speed_percent", U::Fan),
        tuya("switch_valve", U::Valve),
        tuya("alarm_switch", U::Alarm),
        // Sensors
        tuya("va_temperature", U::TemperatureSensor).with_notes("tenths of a degree on most sensors"),
        tuya("va_humidity", U::HumiditySensor),
        tuya("pir", U::MotionSensor),
        tuya("doorcontact_state", U::ContactSensor),
        tuya("presence_state", U::OccupancySensor),
        tuya("bright_value_sensor", U::IlluminanceSensor),
        tuya("battery_percentage", U::Battery),
        tuya("pm25_value", U::AirQualitySensor),
        tuya("watersensor_state", U::WaterLeakSensor),
        tuya("smoke_sensor_status", U::SmokeDetector),
        tuya("switch1_value", U::Button).with_notes("scene switch click/double/hold"),
        tuya("co_state", U::CoDetector),
        // Composite
        tuya("cur_power", U::EnergyMeter).with_notes("instantaneous power, deciwatts"),
        tuya("add_ele", U::EnergyMeter).with_notes("accumulated energy"),
        tuya("power_go", U::RobotVacuum),
        tuya("ir_send", U::IrBlaster),
    ]
}

/// Lutron LEAP zone and device types. Lutron has no color capability.
pub fn lutron_mappings() -> Vec<PlatformCapabilityMapping> {
    vec![
        lutron("Switched", U::Switch),
        lutron("CCO", U::Switch).with_notes("contact closure output"),
        lutron("Dimmed", U::Dimmer)
            .with_conversion()
            .with_notes("level 0.00-100.00"),
        lutron("WhiteTune", U::ColorTemperature),
        lutron("Shade", U::Shade).with_conversion(),
        lutron("ShadeWithTilt", U::Shade).with_conversion(),
        lutron("VenetianBlind", U::Shade).with_conversion(),
        lutron("FanSpeed", U::Fan).with_notes("Off/Low/Medium/MediumHigh/High"),
        lutron("HVAC", U::Thermostat),
        lutron("OccupancySensor", U::OccupancySensor),
        lutron("Pico", U::Button).with_notes("Pico remote button presses"),
    ]
}

/// Standard table for one platform
pub fn platform_mappings(platform: Platform) -> Vec<PlatformCapabilityMapping> {
    match platform {
        Platform::SmartThings => smartthings_mappings(),
        Platform::Tuya => tuya_mappings(),
        Platform::Lutron => lutron_mappings(),
    }
}

/// Standard converter pairs for one platform
///
/// Saturation has no entry: it is 0-100 on every platform and the
/// registry passes unregistered attributes through.
pub fn platform_conversions(platform: Platform) -> Vec<ValueConversionMapping> {
    match platform {
        Platform::SmartThings => vec![ValueConversionMapping::new(
            Platform::SmartThings,
            U::Color,
            "hue",
            "Hue degrees 0-360 <-> percent 0-100",
            value_converters::hue_to_platform,
            value_converters::hue_from_platform,
        )],
        Platform::Tuya => vec![
            ValueConversionMapping::new(
                Platform::Tuya,
                U::Dimmer,
                "level",
                "Brightness 0-100 <-> 0-1000",
                value_converters::brightness_to_platform,
                value_converters::brightness_from_platform,
            ),
            ValueConversionMapping::new(
                Platform::Tuya,
                U::Color,
                "color",
                "HSV {h, s, v 0-100} <-> JSON string {h, s, v 0-255}",
                value_converters::hsv_to_platform,
                value_converters::hsv_from_platform,
            ),
        ],
        Platform::Lutron => vec![
            ValueConversionMapping::new(
                Platform::Lutron,
                U::Dimmer,
                "level",
                "Integer level 0-100 <-> fixed-point 0.00-100.00",
                value_converters::precision_to_platform,
                value_converters::precision_from_platform,
            ),
            ValueConversionMapping::new(
                Platform::Lutron,
                U::Shade,
                "position",
                "Integer position 0-100 <-> fixed-point 0.00-100.00",
                value_converters::precision_to_platform,
                value_converters::precision_from_platform,
            ),
        ],
    }
}

/// Register the standard mapping tables of the given platforms
pub fn register_platform_capabilities(registry: &mut CapabilityRegistry, platforms: &[Platform]) {
    for platform in platforms {
        for mapping in platform_mappings(*platform) {
            registry.register(mapping);
        }
    }
}

/// Register the standard converters of the given platforms
pub fn register_platform_conversions(
    registry: &mut ValueConversionRegistry,
    platforms: &[Platform],
) {
    for platform in platforms {
        for mapping in platform_conversions(*platform) {
            registry.register(mapping);
        }
    }
}

/// Register every standard mapping for all platforms
pub fn register_standard_capabilities(registry: &mut CapabilityRegistry) {
    register_platform_capabilities(registry, &Platform::ALL);
    info!(
        "Registered {} standard capability mappings",
        registry.get_mapping_count()
    );
}

/// Register every standard converter for all platforms
pub fn register_standard_conversions(registry: &mut ValueConversionRegistry) {
    register_platform_conversions(registry, &Platform::ALL);
    info!(
        "Registered {} standard value conversions",
        registry.get_conversion_count()
    );
}
