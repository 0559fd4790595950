use crate::core::types::MergedValueAxisResult;

/// Minimum overlap ratio between two value domains before they are forced
/// onto one shared axis. Empirically chosen; kept configurable rather than
/// re-derived.
pub const MERGE_OVERLAP_THRESHOLD: f64 = 0.10;

/// Decides whether a second layer's value domain should reuse the first
/// layer's axis, and computes the combined domain when it should.
///
/// Two independently-scaled series only share an axis when their numeric
/// ranges substantially coincide; otherwise forced alignment is visually
/// misleading. Even without a merge, the unified tick count keeps gridlines
/// of both axes aligned.
#[must_use]
pub fn merge_value_domains(
    domain1: Option<(f64, f64)>,
    domain2: Option<(f64, f64)>,
    tick_count1: usize,
    tick_count2: usize,
    force_merge: bool,
    overlap_threshold: f64,
) -> MergedValueAxisResult {
    let tick_count = tick_count1.max(tick_count2);

    let (Some((min1, max1)), Some((min2, max2))) = (domain1, domain2) else {
        return MergedValueAxisResult {
            domain: None,
            merged: false,
            tick_count,
            force_start_to_zero: false,
        };
    };

    // A non-merged secondary axis still anchors at zero when both layers
    // are non-negative.
    let force_start_to_zero = min1 >= 0.0 && min2 >= 0.0;

    let combined = (min1.min(min2), max1.max(max2));

    if force_merge {
        return MergedValueAxisResult {
            domain: Some(combined),
            merged: true,
            tick_count,
            force_start_to_zero,
        };
    }

    let disjoint = max1 < min2 || max2 < min1;
    let total_span = combined.1 - combined.0;
    if disjoint || total_span <= 0.0 {
        return MergedValueAxisResult {
            domain: None,
            merged: false,
            tick_count,
            force_start_to_zero,
        };
    }

    let overlap = (max1.min(max2) - min1.max(min2)).abs();
    let merged = overlap / total_span >= overlap_threshold;

    MergedValueAxisResult {
        domain: merged.then_some(combined),
        merged,
        tick_count,
        force_start_to_zero,
    }
}
