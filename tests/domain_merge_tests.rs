use cartesian_rs::core::merge::{MERGE_OVERLAP_THRESHOLD, merge_value_domains};

#[test]
fn overlapping_domains_merge_into_combined_domain() {
    let result = merge_value_domains(
        Some((0.0, 10.0)),
        Some((5.0, 30.0)),
        5,
        6,
        false,
        MERGE_OVERLAP_THRESHOLD,
    );

    assert!(result.merged);
    assert_eq!(result.domain, Some((0.0, 30.0)));
    assert_eq!(result.tick_count, 6);
    assert!(result.force_start_to_zero);
}

#[test]
fn disjoint_domains_never_merge() {
    let result = merge_value_domains(
        Some((0.0, 10.0)),
        Some((100.0, 200.0)),
        6,
        6,
        false,
        MERGE_OVERLAP_THRESHOLD,
    );

    assert!(!result.merged);
    assert_eq!(result.domain, None);
    assert_eq!(result.tick_count, 6);
}

#[test]
fn identical_domains_merge_to_the_same_domain() {
    let result = merge_value_domains(
        Some((-4.0, 12.0)),
        Some((-4.0, 12.0)),
        6,
        6,
        false,
        MERGE_OVERLAP_THRESHOLD,
    );

    assert!(result.merged);
    assert_eq!(result.domain, Some((-4.0, 12.0)));
    assert!(!result.force_start_to_zero);
}

#[test]
fn thin_overlap_below_threshold_refuses_merge() {
    // Overlap 2 over total span 100: 2% < 10%.
    let result = merge_value_domains(
        Some((0.0, 12.0)),
        Some((10.0, 100.0)),
        6,
        6,
        false,
        MERGE_OVERLAP_THRESHOLD,
    );

    assert!(!result.merged);
    assert!(result.force_start_to_zero);
}

#[test]
fn force_merge_wins_even_when_disjoint() {
    let result = merge_value_domains(
        Some((0.0, 10.0)),
        Some((100.0, 200.0)),
        4,
        6,
        true,
        MERGE_OVERLAP_THRESHOLD,
    );

    assert!(result.merged);
    assert_eq!(result.domain, Some((0.0, 200.0)));
}

#[test]
fn negative_domains_do_not_force_zero_anchor() {
    let result = merge_value_domains(
        Some((-10.0, 10.0)),
        Some((5.0, 30.0)),
        6,
        6,
        false,
        MERGE_OVERLAP_THRESHOLD,
    );

    assert!(!result.force_start_to_zero);
}

#[test]
fn missing_domain_refuses_merge_but_keeps_tick_count() {
    let result = merge_value_domains(None, Some((0.0, 10.0)), 3, 8, false, MERGE_OVERLAP_THRESHOLD);

    assert!(!result.merged);
    assert_eq!(result.domain, None);
    assert_eq!(result.tick_count, 8);
}

#[test]
fn zero_total_span_refuses_merge() {
    let result = merge_value_domains(
        Some((5.0, 5.0)),
        Some((5.0, 5.0)),
        6,
        6,
        false,
        MERGE_OVERLAP_THRESHOLD,
    );

    assert!(!result.merged);
}

#[test]
fn merge_is_symmetric() {
    let forward = merge_value_domains(
        Some((0.0, 10.0)),
        Some((5.0, 30.0)),
        6,
        6,
        false,
        MERGE_OVERLAP_THRESHOLD,
    );
    let backward = merge_value_domains(
        Some((5.0, 30.0)),
        Some((0.0, 10.0)),
        6,
        6,
        false,
        MERGE_OVERLAP_THRESHOLD,
    );

    assert_eq!(forward.merged, backward.merged);
    assert_eq!(forward.domain, backward.domain);
}
