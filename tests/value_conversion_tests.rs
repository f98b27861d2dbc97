//! Standard value conversions, exercised through the populated registries

use pretty_assertions::assert_eq;
use rstest::*;
use serde_json::{json, Value};
use smartthings_mcp_rust::{
    error::RegistryError,
    services::{value_converters, Platform, Registries, UnifiedCapability, ValueConversionRegistry},
};

#[fixture]
fn conversions() -> ValueConversionRegistry {
    Registries::standard().conversions().clone()
}

#[rstest]
#[case(json!(750), json!(75))]
#[case(json!(500), json!(50))]
#[case(json!(0), json!(0))]
#[case(json!(1000), json!(100))]
#[case(json!(5), json!(1))]
fn test_tuya_brightness_from_platform(
    conversions: ValueConversionRegistry,
    #[case] platform_value: Value,
    #[case] expected: Value,
) {
    let unified = conversions
        .from_platform(Platform::Tuya, UnifiedCapability::Dimmer, "level", &platform_value)
        .unwrap();
    assert_eq!(unified, expected);
}

#[rstest]
#[case(json!(75), json!(750))]
#[case(json!(50), json!(500))]
#[case(json!(100), json!(1000))]
#[case(json!(33.36), json!(334))]
fn test_tuya_brightness_to_platform(
    conversions: ValueConversionRegistry,
    #[case] unified: Value,
    #[case] expected: Value,
) {
    let platform_value = conversions
        .to_platform(Platform::Tuya, UnifiedCapability::Dimmer, "level", &unified)
        .unwrap();
    assert_eq!(platform_value, expected);
}

#[rstest]
#[case(json!(50), json!(180))]
#[case(json!(0), json!(0))]
#[case(json!(100), json!(360))]
#[case(json!(33), json!(119))]
fn test_smartthings_hue_from_platform(
    conversions: ValueConversionRegistry,
    #[case] percent: Value,
    #[case] degrees: Value,
) {
    assert_eq!(
        conversions
            .from_platform(Platform::SmartThings, UnifiedCapability::Color, "hue", &percent)
            .unwrap(),
        degrees
    );
}

#[rstest]
#[case(json!(270), json!(75))]
#[case(json!(180), json!(50))]
#[case(json!(360), json!(100))]
fn test_smartthings_hue_to_platform(
    conversions: ValueConversionRegistry,
    #[case] degrees: Value,
    #[case] percent: Value,
) {
    assert_eq!(
        conversions
            .to_platform(Platform::SmartThings, UnifiedCapability::Color, "hue", &degrees)
            .unwrap(),
        percent
    );
}

#[rstest]
fn test_tuya_hsv_to_platform(conversions: ValueConversionRegistry) {
    let encoded = conversions
        .to_platform(
            Platform::Tuya,
            UnifiedCapability::Color,
            "color",
            &json!({"h": 180, "s": 100, "v": 100}),
        )
        .unwrap();

    let text = encoded.as_str().expect("HSV is encoded as a string");
    let decoded: Value = serde_json::from_str(text).unwrap();
    assert_eq!(decoded["h"], json!(180));
    assert_eq!(decoded["s"], json!(100));
    let v = decoded["v"].as_i64().unwrap();
    assert!(v == 254 || v == 255, "v = {v}");
}

#[rstest]
fn test_tuya_hsv_from_platform(conversions: ValueConversionRegistry) {
    let unified = conversions
        .from_platform(
            Platform::Tuya,
            UnifiedCapability::Color,
            "color",
            &json!(r#"{"h":180,"s":100,"v":255}"#),
        )
        .unwrap();
    assert_eq!(unified, json!({"h": 180, "s": 100, "v": 100}));
}

#[rstest]
#[case(json!({"h": 180.6, "s": 50.4, "v": 100}), 180, 50)]
#[case(json!({"h": 0.9, "s": 99.99, "v": 0}), 0, 99)]
#[case(json!({"h": "359.5", "s": 10, "v": 50}), 359, 10)]
fn test_tuya_hsv_to_platform_truncates_hue_and_saturation(
    conversions: ValueConversionRegistry,
    #[case] unified: Value,
    #[case] h: i64,
    #[case] s: i64,
) {
    let encoded = conversions
        .to_platform(Platform::Tuya, UnifiedCapability::Color, "color", &unified)
        .unwrap();
    let decoded: Value = serde_json::from_str(encoded.as_str().unwrap()).unwrap();
    assert_eq!(decoded["h"], json!(h));
    assert_eq!(decoded["s"], json!(s));
}

#[rstest]
#[case(r#"{"h":120.7,"s":33.3,"v":128}"#, json!({"h": 120, "s": 33, "v": 50}))]
#[case(r#"{"h":0.2,"s":100.0,"v":255}"#, json!({"h": 0, "s": 100, "v": 100}))]
fn test_tuya_hsv_from_platform_truncates_hue_and_saturation(
    conversions: ValueConversionRegistry,
    #[case] encoded: &str,
    #[case] expected: Value,
) {
    assert_eq!(
        conversions
            .from_platform(Platform::Tuya, UnifiedCapability::Color, "color", &json!(encoded))
            .unwrap(),
        expected
    );
}

#[rstest]
#[case(Platform::Lutron, UnifiedCapability::Dimmer, "level", json!(1e308))]
#[case(Platform::Tuya, UnifiedCapability::Dimmer, "level", json!(1e300))]
fn test_out_of_range_values_are_rejected(
    conversions: ValueConversionRegistry,
    #[case] platform: Platform,
    #[case] capability: UnifiedCapability,
    #[case] attribute: &str,
    #[case] value: Value,
) {
    let err = conversions
        .to_platform(platform, capability, attribute, &value)
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidValue(_)), "{err:?}");
}

#[rstest]
#[case(json!("not json"))]
#[case(json!("{\"h\":180"))]
fn test_malformed_hsv_is_a_parsing_error(
    conversions: ValueConversionRegistry,
    #[case] encoded: Value,
) {
    let err = conversions
        .from_platform(Platform::Tuya, UnifiedCapability::Color, "color", &encoded)
        .unwrap_err();
    assert!(matches!(err, RegistryError::Parsing(_)), "{err:?}");
}

#[rstest]
fn test_hsv_missing_component_is_rejected(conversions: ValueConversionRegistry) {
    let err = conversions
        .from_platform(
            Platform::Tuya,
            UnifiedCapability::Color,
            "color",
            &json!(r#"{"h":180,"s":100}"#),
        )
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidValue(_)), "{err:?}");
}

#[rstest]
#[case(json!(73.45), json!(73))]
#[case(json!(73.5), json!(74))]
#[case(json!(100.0), json!(100))]
#[case(json!(0.0), json!(0))]
fn test_lutron_level_from_platform(
    conversions: ValueConversionRegistry,
    #[case] platform_value: Value,
    #[case] expected: Value,
) {
    assert_eq!(
        conversions
            .from_platform(Platform::Lutron, UnifiedCapability::Dimmer, "level", &platform_value)
            .unwrap(),
        expected
    );
}

#[rstest]
#[case(json!(50), "50.00")]
#[case(json!(0), "0.00")]
#[case(json!(100), "100.00")]
fn test_lutron_level_to_platform_formats_two_decimals(
    conversions: ValueConversionRegistry,
    #[case] unified: Value,
    #[case] formatted: &str,
) {
    let platform_value = conversions
        .to_platform(Platform::Lutron, UnifiedCapability::Dimmer, "level", &unified)
        .unwrap();
    assert!(platform_value.is_f64());
    assert_eq!(
        value_converters::format_two_decimals(&platform_value).as_deref(),
        Some(formatted)
    );
}

#[rstest]
fn test_lutron_shade_position(conversions: ValueConversionRegistry) {
    assert_eq!(
        conversions
            .from_platform(
                Platform::Lutron,
                UnifiedCapability::Shade,
                "position",
                &json!(42.2)
            )
            .unwrap(),
        json!(42)
    );
}

#[rstest]
#[case(Platform::Tuya, UnifiedCapability::Dimmer, "transition")]
#[case(Platform::SmartThings, UnifiedCapability::Color, "saturation")]
#[case(Platform::SmartThings, UnifiedCapability::Dimmer, "level")]
#[case(Platform::Lutron, UnifiedCapability::Switch, "switch")]
fn test_unregistered_attribute_passes_through(
    conversions: ValueConversionRegistry,
    #[case] platform: Platform,
    #[case] capability: UnifiedCapability,
    #[case] attribute: &str,
) {
    let value = json!(42);
    assert!(!conversions.has_conversion(platform, capability, attribute));
    assert_eq!(
        conversions
            .to_platform(platform, capability, attribute, &value)
            .unwrap(),
        value
    );
    assert_eq!(
        conversions
            .from_platform(platform, capability, attribute, &value)
            .unwrap(),
        value
    );
}

#[rstest]
fn test_non_numeric_input_is_rejected(conversions: ValueConversionRegistry) {
    let err = conversions
        .to_platform(Platform::Tuya, UnifiedCapability::Dimmer, "level", &json!("bright"))
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidValue(_)));
}

#[rstest]
fn test_numeric_strings_are_accepted(conversions: ValueConversionRegistry) {
    assert_eq!(
        conversions
            .from_platform(Platform::Tuya, UnifiedCapability::Dimmer, "level", &json!("750"))
            .unwrap(),
        json!(75)
    );
}

#[test]
fn test_hue_round_trip_drift_is_bounded() {
    for degrees in 0..=360i64 {
        let percent = value_converters::hue_to_platform(&json!(degrees)).unwrap();
        let back = value_converters::hue_from_platform(&percent)
            .unwrap()
            .as_i64()
            .unwrap();
        assert!((back - degrees).abs() <= 2, "{degrees} -> {percent} -> {back}");
    }
}
