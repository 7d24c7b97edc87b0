use axiskit::core::{RangeBandConfig, StepSizeConfig, ViewportSettings};
use axiskit::layout::{LayoutConfig, MarginSpec, ViewLayoutConfig, ViewMargin};
use axiskit::layout::LayoutPosition;
use axiskit::ticks::AxisOrientation;

#[test]
fn range_band_config_round_trips_as_tagged_json() {
    let config = RangeBandConfig::FixedSpaceFromStep { pixels: 10.0 };
    let json = serde_json::to_string(&config).expect("serializes");
    assert!(json.contains("\"fixed_space_from_step\""));

    let back: RangeBandConfig = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(back, config);
}

#[test]
fn step_size_config_round_trips() {
    for config in [
        StepSizeConfig::AutoDetect,
        StepSizeConfig::Fixed { pixels: 24.0 },
        StepSizeConfig::FixedDomain { domain: 2.5 },
    ] {
        let json = serde_json::to_string(&config).expect("serializes");
        let back: StepSizeConfig = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, config);
    }
}

#[test]
fn viewport_settings_round_trip() {
    let settings = ViewportSettings::new(2.5, -120.0).expect("valid settings");
    let json = serde_json::to_string(&settings).expect("serializes");
    let back: ViewportSettings = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(back, settings);
}

#[test]
fn layout_config_round_trips_with_margin_specs() {
    let config = LayoutConfig {
        left: MarginSpec::from_pixel(Some(10.0), Some(80.0)).expect("valid spec"),
        right: MarginSpec::from_percent(None, Some(0.25)).expect("valid spec"),
        top: MarginSpec::default(),
        bottom: MarginSpec::fixed_pixel(30.0).expect("valid spec"),
    };

    let json = serde_json::to_string(&config).expect("serializes");
    let back: LayoutConfig = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(back, config);
}

#[test]
fn view_layout_config_round_trips() {
    let config = ViewLayoutConfig::new(LayoutPosition::FullBottom)
        .with_paint_order(7)
        .with_position_order(21)
        .with_margin(ViewMargin::uniform(3.0));

    let json = serde_json::to_string(&config).expect("serializes");
    assert!(json.contains("\"full_bottom\""));
    let back: ViewLayoutConfig = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(back, config);
}

#[test]
fn axis_orientation_is_serializable() {
    let json = serde_json::to_string(&AxisOrientation::Left).expect("serializes");
    let back: AxisOrientation = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(back, AxisOrientation::Left);
}
