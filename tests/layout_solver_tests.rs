use approx::assert_abs_diff_eq;
use cartesian_rs::api::layout::{
    self, LayoutTuning, MAX_LAYOUT_PASSES, ROTATION_DEGREES, SCROLLBAR_ROTATION_DEGREES,
    SolvedAxes, TICK_LABEL_PADDING,
};
use cartesian_rs::api::measure::{FontSpec, HeuristicTextMeasurer, TextMeasurer};
use cartesian_rs::core::axis_props::{AxisPropertiesOptions, build_axis_properties};
use cartesian_rs::core::{AxisValueType, DataDomain, DefaultFormatterFactory, Viewport};
use cartesian_rs::error::AxisError;

fn axes_with_labels(labels: &[&str], x_span: f64, y_span: f64) -> SolvedAxes {
    let owned: Vec<String> = labels.iter().map(|label| (*label).to_owned()).collect();
    let x_options = AxisPropertiesOptions::new(
        x_span,
        Some(DataDomain::ordinal_indices(owned.len())),
        AxisValueType::Text,
    )
    .with_category_labels(owned);
    let y_options = AxisPropertiesOptions::new(
        y_span,
        Some(DataDomain::scalar(0.0, 100.0)),
        AxisValueType::Numeric,
    )
    .with_vertical(true);

    SolvedAxes {
        x: build_axis_properties(&x_options, &DefaultFormatterFactory),
        y1: build_axis_properties(&y_options, &DefaultFormatterFactory),
        y2: None,
    }
}

#[test]
fn solver_settles_in_two_passes_for_stable_labels() {
    let result = layout::compute_layout(
        Viewport::new(600, 400),
        &FontSpec::default(),
        &HeuristicTextMeasurer,
        LayoutTuning::default(),
        false,
        |x_span, y_span| axes_with_labels(&["a", "b", "c"], x_span, y_span),
    )
    .expect("layout solve");

    // The tick set is independent of the plot span, so the second pass
    // re-measures identical margins and stops.
    assert_eq!(result.passes, 2);
    assert!(result.passes <= MAX_LAYOUT_PASSES);
}

#[test]
fn left_margin_tracks_longest_value_label() {
    let font = FontSpec::default();
    let result = layout::compute_layout(
        Viewport::new(600, 400),
        &font,
        &HeuristicTextMeasurer,
        LayoutTuning::default(),
        false,
        |x_span, y_span| axes_with_labels(&["a", "b", "c"], x_span, y_span),
    )
    .expect("layout solve");

    let expected = HeuristicTextMeasurer.measure("100", &font) + TICK_LABEL_PADDING;
    assert_abs_diff_eq!(result.margin.left, expected, epsilon = 1e-9);
}

#[test]
fn plot_area_excludes_margins() {
    let result = layout::compute_layout(
        Viewport::new(600, 400),
        &FontSpec::default(),
        &HeuristicTextMeasurer,
        LayoutTuning::default(),
        false,
        |x_span, y_span| axes_with_labels(&["a", "b", "c"], x_span, y_span),
    )
    .expect("layout solve");

    assert_abs_diff_eq!(result.plot_width, 600.0 - result.margin.horizontal(), epsilon = 1e-9);
    assert_abs_diff_eq!(result.plot_height, 400.0 - result.margin.vertical(), epsilon = 1e-9);
}

#[test]
fn long_labels_trigger_rotation() {
    let labels = [
        "Quarterly Revenue Forecast A",
        "Quarterly Revenue Forecast B",
        "Quarterly Revenue Forecast C",
        "Quarterly Revenue Forecast D",
        "Quarterly Revenue Forecast E",
        "Quarterly Revenue Forecast F",
        "Quarterly Revenue Forecast G",
        "Quarterly Revenue Forecast H",
    ];
    let result = layout::compute_layout(
        Viewport::new(320, 400),
        &FontSpec::default(),
        &HeuristicTextMeasurer,
        LayoutTuning::default(),
        false,
        |x_span, y_span| axes_with_labels(&labels, x_span, y_span),
    )
    .expect("layout solve");

    assert!(result.will_rotate);
    assert_eq!(result.rotation_degrees, ROTATION_DEGREES);
    // Rotated labels need more room below the plot than upright ones.
    let upright = 11.0 + TICK_LABEL_PADDING * 2.0 + 11.0;
    assert!(result.margin.bottom > upright);
}

#[test]
fn scrollbar_swaps_in_vertical_rotation_angle() {
    let labels = [
        "Quarterly Revenue Forecast A",
        "Quarterly Revenue Forecast B",
        "Quarterly Revenue Forecast C",
        "Quarterly Revenue Forecast D",
    ];
    let result = layout::compute_layout(
        Viewport::new(320, 400),
        &FontSpec::default(),
        &HeuristicTextMeasurer,
        LayoutTuning::default(),
        true,
        |x_span, y_span| axes_with_labels(&labels, x_span, y_span),
    )
    .expect("layout solve");

    assert!(result.will_rotate);
    assert_eq!(result.rotation_degrees, SCROLLBAR_ROTATION_DEGREES);
}

#[test]
fn bottom_margin_is_capped_by_viewport_ratio() {
    let long: Vec<String> = (0..6)
        .map(|i| format!("an extremely long category label number {i}"))
        .collect();
    let refs: Vec<&str> = long.iter().map(String::as_str).collect();
    let result = layout::compute_layout(
        Viewport::new(320, 200),
        &FontSpec::default(),
        &HeuristicTextMeasurer,
        LayoutTuning::default(),
        true,
        |x_span, y_span| axes_with_labels(&refs, x_span, y_span),
    )
    .expect("layout solve");

    assert!(result.margin.bottom <= 200.0 * layout::MAX_BOTTOM_MARGIN_RATIO + 1e-9);
}

#[test]
fn short_labels_stay_upright() {
    let result = layout::compute_layout(
        Viewport::new(600, 400),
        &FontSpec::default(),
        &HeuristicTextMeasurer,
        LayoutTuning::default(),
        false,
        |x_span, y_span| axes_with_labels(&["a", "b"], x_span, y_span),
    )
    .expect("layout solve");

    assert!(!result.will_rotate);
    assert_eq!(result.rotation_degrees, 0.0);
}

#[test]
fn rotation_can_be_disabled() {
    let labels = [
        "Quarterly Revenue Forecast A",
        "Quarterly Revenue Forecast B",
        "Quarterly Revenue Forecast C",
        "Quarterly Revenue Forecast D",
    ];
    let tuning = LayoutTuning {
        rotation_enabled: false,
        ..LayoutTuning::default()
    };
    let result = layout::compute_layout(
        Viewport::new(320, 400),
        &FontSpec::default(),
        &HeuristicTextMeasurer,
        tuning,
        false,
        |x_span, y_span| axes_with_labels(&labels, x_span, y_span),
    )
    .expect("layout solve");

    assert!(!result.will_rotate);
}

#[test]
fn empty_viewport_is_rejected() {
    let result = layout::compute_layout(
        Viewport::new(0, 400),
        &FontSpec::default(),
        &HeuristicTextMeasurer,
        LayoutTuning::default(),
        false,
        |x_span, y_span| axes_with_labels(&["a"], x_span, y_span),
    );

    assert!(matches!(result, Err(AxisError::InvalidViewport { .. })));
}

#[test]
fn out_of_range_rotation_angle_is_rejected() {
    let tuning = LayoutTuning {
        rotation_degrees: 120.0,
        ..LayoutTuning::default()
    };
    let result = layout::compute_layout(
        Viewport::new(600, 400),
        &FontSpec::default(),
        &HeuristicTextMeasurer,
        tuning,
        false,
        |x_span, y_span| axes_with_labels(&["a"], x_span, y_span),
    );

    assert!(matches!(result, Err(AxisError::InvalidConfig(_))));
}
