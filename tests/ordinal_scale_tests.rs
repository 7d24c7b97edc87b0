use axiskit::core::{OrdinalScale, RangeBandConfig, ScaleOutputExtent, StepSizeConfig};
use axiskit::error::AxisError;

fn scale_with(keys: &[&str], range: (f64, f64)) -> OrdinalScale {
    let mut scale = OrdinalScale::new();
    scale.add_domains(keys.iter().copied());
    scale.set_range(ScaleOutputExtent::new(range.0, range.1).expect("finite range"));
    scale
}

#[test]
fn unknown_keys_map_to_zero() {
    let scale = scale_with(&["a", "b", "c"], (0.0, 300.0));
    assert_eq!(scale.apply("missing"), 0.0);
}

#[test]
fn adding_an_existing_key_is_idempotent() {
    let mut scale = scale_with(&["a", "b", "c"], (0.0, 300.0));
    let before = scale.apply("b");
    scale.add_domain("b");
    assert_eq!(scale.len(), 3);
    assert_eq!(scale.apply("b"), before);
}

#[test]
fn reverse_clamps_to_valid_keys_for_any_pixel() {
    let scale = scale_with(&["a", "b", "c", "d"], (0.0, 400.0));

    assert_eq!(scale.reverse(-10_000.0), Some("a"));
    assert_eq!(scale.reverse(10_000.0), Some("d"));
    assert_eq!(scale.reverse(160.0), Some("b"));
    assert_eq!(scale.reverse(250.0), Some("c"));
}

#[test]
fn reverse_on_an_empty_domain_is_none() {
    let scale = OrdinalScale::new();
    assert!(scale.reverse(100.0).is_none());
}

#[test]
fn vertical_range_places_first_key_at_range_start() {
    let scale = scale_with(&["a", "b", "c"], (300.0, 0.0));

    assert_eq!(scale.step_size(), -100.0);
    assert_eq!(scale.apply("a"), 250.0);
    assert_eq!(scale.apply("c"), 50.0);
    assert_eq!(scale.reverse(260.0), Some("a"));
    assert_eq!(scale.reverse(40.0), Some("c"));
}

#[test]
fn windowing_zooms_and_anchors_the_starting_key() {
    let mut scale = scale_with(&["a", "b", "c", "d", "e", "f"], (0.0, 300.0));
    scale
        .set_viewport(Some(3), Some("c"))
        .expect("valid viewport");

    assert_eq!(scale.step_size(), 100.0);
    assert_eq!(scale.range_band(), 65.0);
    assert_eq!(scale.apply("c"), 50.0);
    assert_eq!(scale.apply("d"), 150.0);
    assert_eq!(scale.apply("e"), 250.0);
    // Keys outside the window still resolve, just off-range.
    assert_eq!(scale.apply("a"), -150.0);
}

#[test]
fn vertical_windowing_anchors_at_the_bottom() {
    let mut scale = scale_with(&["a", "b", "c", "d", "e", "f"], (300.0, 0.0));
    scale
        .set_viewport(Some(3), Some("c"))
        .expect("valid viewport");

    assert_eq!(scale.step_size(), -100.0);
    assert_eq!(scale.apply("c"), 250.0);
    assert_eq!(scale.apply("e"), 50.0);
}

#[test]
fn oversized_windows_clamp_to_the_domain_count() {
    let mut scale = scale_with(&["a", "b", "c"], (0.0, 300.0));
    scale
        .set_viewport(Some(10), Some("a"))
        .expect("valid viewport");

    assert_eq!(scale.step_size(), 100.0);
    assert_eq!(scale.apply("a"), 50.0);
}

#[test]
fn viewport_preconditions_fail_fast() {
    let mut scale = scale_with(&["a", "b", "c"], (0.0, 300.0));

    assert!(matches!(
        scale.set_viewport(Some(0), Some("a")),
        Err(AxisError::Precondition(_))
    ));
    assert!(matches!(
        scale.set_viewport(None, Some("a")),
        Err(AxisError::Precondition(_))
    ));
    assert!(matches!(
        scale.set_viewport(Some(2), Some("zz")),
        Err(AxisError::Precondition(_))
    ));
}

#[test]
fn config_preconditions_fail_fast() {
    let mut scale = scale_with(&["a", "b"], (0.0, 200.0));

    assert!(matches!(
        scale.set_step_size_config(StepSizeConfig::Fixed { pixels: 10.0 }),
        Err(AxisError::Precondition(_))
    ));
    assert!(matches!(
        scale.set_range_band_config(RangeBandConfig::None),
        Err(AxisError::Precondition(_))
    ));
    assert!(matches!(
        scale.set_range_band_config(RangeBandConfig::FixedDomain { domain: 1.0 }),
        Err(AxisError::Precondition(_))
    ));

    scale
        .set_range_band_config(RangeBandConfig::Fixed { pixels: 30.0 })
        .expect("pixel bands are valid");
    assert_eq!(scale.range_band(), 30.0);
}
