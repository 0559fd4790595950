use cartesian_rs::core::scale_build::{
    self, FALLBACK_DATE_DOMAIN, FALLBACK_NUMERIC_DOMAIN, ScaleOptions, build_scale, create_domain,
    normalize_linear_domain,
};
use cartesian_rs::core::{AxisValueType, DataDomain};

#[test]
fn degenerate_nonzero_domain_is_widened_around_value() {
    let (min, max, fell_back) = normalize_linear_domain(7.0, 7.0, FALLBACK_NUMERIC_DOMAIN);

    assert!(!fell_back);
    assert!(min < max);
    assert!(min <= 7.0 && 7.0 <= max);
    assert!((min - 5.6).abs() <= 1e-9);
    assert!((max - 8.4).abs() <= 1e-9);
}

#[test]
fn degenerate_zero_domain_uses_fallback_max() {
    let (min, max, fell_back) = normalize_linear_domain(0.0, 0.0, FALLBACK_NUMERIC_DOMAIN);

    assert!(!fell_back);
    assert_eq!(min, 0.0);
    assert_eq!(max, FALLBACK_NUMERIC_DOMAIN.1);
}

#[test]
fn nan_domain_substitutes_fallback() {
    let (min, max, fell_back) = normalize_linear_domain(f64::NAN, 5.0, FALLBACK_NUMERIC_DOMAIN);

    assert!(fell_back);
    assert_eq!((min, max), FALLBACK_NUMERIC_DOMAIN);
}

#[test]
fn near_zero_minimum_snaps_to_exact_zero() {
    let (min, max, _) = normalize_linear_domain(0.0005, 100.0, FALLBACK_NUMERIC_DOMAIN);

    assert_eq!(min, 0.0);
    assert_eq!(max, 100.0);
}

#[test]
fn minimum_beyond_snap_ratio_is_preserved() {
    let (min, _, _) = normalize_linear_domain(0.5, 100.0, FALLBACK_NUMERIC_DOMAIN);

    assert_eq!(min, 0.5);
}

#[test]
fn missing_numeric_domain_flags_default() {
    let options = ScaleOptions::new(500.0, None, AxisValueType::Numeric);
    let result = build_scale(&options);

    assert!(result.using_default_domain);
    let linear = result.scale.as_linear().expect("scalar axis");
    let (min, max) = linear.domain();
    assert!(min <= FALLBACK_NUMERIC_DOMAIN.0);
    assert!(max >= FALLBACK_NUMERIC_DOMAIN.1);
}

#[test]
fn missing_date_domain_uses_date_fallback() {
    let options = ScaleOptions::new(500.0, None, AxisValueType::DateTime);
    let result = build_scale(&options);

    assert!(result.using_default_domain);
    let (min, max) = result.scale.as_linear().expect("scalar axis").domain();
    assert_eq!((min, max), FALLBACK_DATE_DOMAIN);
}

#[test]
fn text_axis_yields_band_scale_over_indices() {
    let options = ScaleOptions::new(
        400.0,
        Some(DataDomain::ordinal_indices(4)),
        AxisValueType::Text,
    );
    let result = build_scale(&options);

    let band = result.scale.as_band().expect("ordinal axis");
    assert_eq!(band.domain_len(), 4);
    assert!(!result.using_default_domain);
    assert_eq!(result.tick_values, vec![0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn scale_building_is_idempotent() {
    let options = ScaleOptions::new(
        640.0,
        Some(DataDomain::scalar(-3.5, 92.0)),
        AxisValueType::Numeric,
    );

    let first = build_scale(&options);
    let second = build_scale(&options);

    assert_eq!(first.scale, second.scale);
    assert_eq!(first.tick_values, second.tick_values);
    assert_eq!(first.best_tick_count, second.best_tick_count);
}

#[test]
fn create_domain_returns_indices_for_text_categories() {
    let domain = create_domain(&[7.0, 22.0], 4, AxisValueType::Text, false);

    assert_eq!(domain, DataDomain::Ordinal(vec![0, 1, 2, 3]));
}

#[test]
fn create_domain_returns_min_max_for_scalar_values() {
    let domain = create_domain(&[7.0, 22.0, 11.0], 3, AxisValueType::Numeric, true);

    assert_eq!(domain, DataDomain::scalar(7.0, 22.0));
}

#[test]
fn create_domain_with_no_finite_values_triggers_fallback_later() {
    let domain = create_domain(&[f64::NAN], 1, AxisValueType::Numeric, true);
    let options = ScaleOptions::new(300.0, Some(domain), AxisValueType::Numeric);

    let result = build_scale(&options);
    assert!(result.using_default_domain);
}

#[test]
fn outer_padding_ratio_derives_from_category_thickness() {
    let options = ScaleOptions::new(
        400.0,
        Some(DataDomain::ordinal_indices(10)),
        AxisValueType::Text,
    )
    .with_category_thickness(20.0, 8.0);
    let result = build_scale(&options);

    let band = result.scale.as_band().expect("ordinal axis");
    assert!((band.outer_padding() - 0.4).abs() <= 1e-9);
}

#[test]
fn forced_tick_count_wins_over_derived_count() {
    let options = ScaleOptions::new(
        500.0,
        Some(DataDomain::scalar(0.0, 100.0)),
        AxisValueType::Numeric,
    )
    .with_forced_tick_count(4);
    let result = build_scale(&options);

    assert_eq!(result.best_tick_count, 4);
}

#[test]
fn inner_padding_ratio_is_module_wide() {
    assert_eq!(scale_build::INNER_PADDING_RATIO, 0.2);
}
