use cartesian_rs::core::axis_props::{AxisPropertiesOptions, build_axis_properties};
use cartesian_rs::core::{AxisValueType, DataDomain, DefaultFormatterFactory};

#[test]
fn scalar_numeric_axis_formats_every_tick() {
    let options = AxisPropertiesOptions::new(
        500.0,
        Some(DataDomain::scalar(0.0, 100.0)),
        AxisValueType::Numeric,
    );
    let axis = build_axis_properties(&options, &DefaultFormatterFactory);

    assert!(!axis.is_category_axis);
    assert_eq!(axis.tick_labels.len(), axis.tick_values.len());
    assert!(axis.tick_labels.iter().all(|label| !label.is_empty()));
}

#[test]
fn ordinal_text_axis_uses_category_labels() {
    let labels = vec!["North".to_owned(), "South".to_owned(), "East".to_owned()];
    let options = AxisPropertiesOptions::new(
        300.0,
        Some(DataDomain::ordinal_indices(3)),
        AxisValueType::Text,
    )
    .with_category_labels(labels.clone());
    let axis = build_axis_properties(&options, &DefaultFormatterFactory);

    assert!(axis.is_category_axis);
    assert_eq!(axis.tick_labels, labels);
}

#[test]
fn ordinal_datetime_axis_formats_category_values() {
    let jan = 1_609_459_200_000.0; // 2021-01-01
    let mar = 1_614_556_800_000.0; // 2021-03-01
    let may = 1_619_827_200_000.0; // 2021-05-01

    let mut options = AxisPropertiesOptions::new(
        300.0,
        Some(DataDomain::ordinal_indices(3)),
        AxisValueType::DateTime,
    )
    .with_scalar(false);
    options.category_values = Some(vec![jan, mar, may]);

    let axis = build_axis_properties(&options, &DefaultFormatterFactory);

    assert!(axis.is_category_axis);
    assert_eq!(axis.tick_labels.len(), 3);
    // Index-derived min/max span four months, so labels carry month + year.
    assert_eq!(axis.tick_labels[0], "Jan 2021");
    assert_eq!(axis.tick_labels[2], "May 2021");
}

#[test]
fn scalar_request_for_text_column_downgrades_to_ordinal() {
    let options = AxisPropertiesOptions::new(
        300.0,
        Some(DataDomain::ordinal_indices(5)),
        AxisValueType::Text,
    )
    .with_scalar(true);
    let axis = build_axis_properties(&options, &DefaultFormatterFactory);

    assert!(axis.is_category_axis);
    assert!(axis.scale.is_ordinal());
}

#[test]
fn label_max_width_uses_category_thickness_when_known() {
    let mut options = AxisPropertiesOptions::new(
        400.0,
        Some(DataDomain::ordinal_indices(8)),
        AxisValueType::Text,
    );
    options.category_thickness = Some(37.0);
    let axis = build_axis_properties(&options, &DefaultFormatterFactory);

    assert_eq!(axis.x_label_max_width, 37.0);
}

#[test]
fn label_max_width_divides_span_by_tick_count_plus_one() {
    let options = AxisPropertiesOptions::new(
        500.0,
        Some(DataDomain::scalar(0.0, 100.0)),
        AxisValueType::Numeric,
    );
    let axis = build_axis_properties(&options, &DefaultFormatterFactory);

    let tick_count = axis.tick_values.len();
    assert!(tick_count > 1);
    let expected = 500.0 / (tick_count + 1) as f64;
    assert!((axis.x_label_max_width - expected).abs() <= 1e-9);
}

#[test]
fn missing_domain_surfaces_default_flag() {
    let options = AxisPropertiesOptions::new(300.0, None, AxisValueType::Numeric);
    let axis = build_axis_properties(&options, &DefaultFormatterFactory);

    assert!(axis.using_default_domain);
}

#[test]
fn display_units_follow_tick_interval_when_requested() {
    let mut options = AxisPropertiesOptions::new(
        400.0,
        Some(DataDomain::scalar(0.0, 4_000_000.0)),
        AxisValueType::Numeric,
    );
    options.use_tick_interval_for_display_units = true;
    let axis = build_axis_properties(&options, &DefaultFormatterFactory);

    assert!(axis.tick_labels.iter().any(|label| label.ends_with('M')));
}

#[test]
fn axis_rebuild_with_same_inputs_is_identical() {
    let options = AxisPropertiesOptions::new(
        500.0,
        Some(DataDomain::scalar(-10.0, 55.0)),
        AxisValueType::Numeric,
    );

    let first = build_axis_properties(&options, &DefaultFormatterFactory);
    let second = build_axis_properties(&options, &DefaultFormatterFactory);

    assert_eq!(first.scale, second.scale);
    assert_eq!(first.tick_values, second.tick_values);
    assert_eq!(first.tick_labels, second.tick_labels);
}
