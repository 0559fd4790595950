use serde::{Deserialize, Serialize};

use crate::core::scale::{BandScale, LinearScale, Scale};
use crate::core::ticks;
use crate::core::types::{AxisValueType, DataDomain};

/// Inner padding between ordinal bands, as a ratio of the band step.
pub const INNER_PADDING_RATIO: f64 = 0.2;

/// Ratio of the domain span below which a scalar domain minimum is treated
/// as floating point noise and snapped to exactly zero.
pub const DOMAIN_ZERO_SNAP_RATIO: f64 = 1e-4;

/// Widening applied to each side of a degenerate non-zero scalar domain.
pub const DEGENERATE_DOMAIN_WIDEN_RATIO: f64 = 0.2;

/// Fallback scalar domain for numeric axes with no usable data.
pub const FALLBACK_NUMERIC_DOMAIN: (f64, f64) = (0.0, 10.0);

/// Fallback scalar domain for date-time axes with no usable data:
/// 2014-02-01 through 2015-02-01, as Unix milliseconds.
pub const FALLBACK_DATE_DOMAIN: (f64, f64) = (1_391_212_800_000.0, 1_422_748_800_000.0);

/// Default tick budget when the caller does not constrain it.
pub const DEFAULT_MAX_TICK_COUNT: usize = 8;

/// Inputs to [`build_scale`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleOptions {
    pub pixel_span: f64,
    pub data_domain: Option<DataDomain>,
    pub value_type: AxisValueType,
    pub is_scalar: bool,
    /// Caller-forced tick count; wins over the derived best count.
    pub forced_tick_count: Option<usize>,
    pub max_tick_count: usize,
    /// Outer padding in pixels, converted to a step ratio via the
    /// category thickness when that is known.
    pub outer_padding: f64,
    pub category_thickness: Option<f64>,
    /// Minimum spacing between linear tick values, in domain units.
    pub min_tick_interval: Option<f64>,
    /// Value types of the backing data columns, for integer-aware tick counts.
    pub column_types: Vec<AxisValueType>,
}

impl ScaleOptions {
    #[must_use]
    pub fn new(pixel_span: f64, data_domain: Option<DataDomain>, value_type: AxisValueType) -> Self {
        Self {
            pixel_span,
            data_domain,
            value_type,
            is_scalar: value_type.supports_scalar(),
            forced_tick_count: None,
            max_tick_count: DEFAULT_MAX_TICK_COUNT,
            outer_padding: 0.0,
            category_thickness: None,
            min_tick_interval: None,
            column_types: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_scalar(mut self, is_scalar: bool) -> Self {
        self.is_scalar = is_scalar;
        self
    }

    #[must_use]
    pub fn with_forced_tick_count(mut self, tick_count: usize) -> Self {
        self.forced_tick_count = Some(tick_count);
        self
    }

    #[must_use]
    pub fn with_max_tick_count(mut self, max_tick_count: usize) -> Self {
        self.max_tick_count = max_tick_count;
        self
    }

    #[must_use]
    pub fn with_category_thickness(mut self, thickness: f64, outer_padding: f64) -> Self {
        self.category_thickness = Some(thickness);
        self.outer_padding = outer_padding;
        self
    }

    /// Effective axis kind after the defensive ordinal downgrade.
    #[must_use]
    pub fn effective_scalar(&self) -> bool {
        self.is_scalar && self.value_type.supports_scalar()
    }
}

/// Output of [`build_scale`]: the scale, its tick values and the derived tick
/// count travel together so they cannot drift apart between scale creation
/// and tick generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleBuildResult {
    pub scale: Scale,
    pub tick_values: Vec<f64>,
    pub best_tick_count: usize,
    pub using_default_domain: bool,
}

/// Derives an axis input domain from raw per-category values.
///
/// Scalar-capable columns asked for a scalar axis get the `[min, max]` of the
/// values; everything else gets the ordinal index domain `[0, count)`.
#[must_use]
pub fn create_domain(
    values: &[f64],
    category_count: usize,
    value_type: AxisValueType,
    is_scalar: bool,
) -> DataDomain {
    if is_scalar && value_type.supports_scalar() {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values {
            if value.is_finite() {
                min = min.min(*value);
                max = max.max(*value);
            }
        }
        if min > max {
            // No usable values; the NaN bounds trigger fallback substitution.
            return DataDomain::scalar(f64::NAN, f64::NAN);
        }
        return DataDomain::scalar(min, max);
    }

    DataDomain::ordinal_indices(category_count)
}

/// Builds a renderable scale plus matching tick values for one axis.
///
/// Never fails on bad data: unusable domains are replaced by fixed fallbacks
/// and reported through `using_default_domain`.
#[must_use]
pub fn build_scale(options: &ScaleOptions) -> ScaleBuildResult {
    if options.effective_scalar() {
        build_scalar_scale(options)
    } else {
        build_ordinal_scale(options)
    }
}

fn build_scalar_scale(options: &ScaleOptions) -> ScaleBuildResult {
    let is_date_time = options.value_type.is_date_time();
    let fallback = if is_date_time {
        FALLBACK_DATE_DOMAIN
    } else {
        FALLBACK_NUMERIC_DOMAIN
    };

    let raw_bounds = options
        .data_domain
        .as_ref()
        .and_then(DataDomain::scalar_bounds);
    let mut using_default_domain = raw_bounds.is_none();

    let (raw_min, raw_max) = raw_bounds.unwrap_or(fallback);
    let (min, max, fell_back) = normalize_linear_domain(raw_min, raw_max, fallback);
    using_default_domain |= fell_back;

    let best_tick_count = options.forced_tick_count.unwrap_or_else(|| {
        ticks::best_tick_count(
            min,
            max,
            &options.column_types,
            options.max_tick_count,
            is_date_time,
        )
    });

    // Nice-round the domain to the tick step, except for date-time scalar
    // axes: their tick values are millisecond timestamps and visually "nice"
    // numeric bounds have no meaning there.
    let (min, max, tick_values) = if is_date_time {
        let tick_values = ticks::recommended_datetime_ticks(min, max, best_tick_count.max(1));
        (min, max, tick_values)
    } else {
        let tick_values =
            ticks::recommended_linear_ticks(min, max, best_tick_count, options.min_tick_interval);
        let min = tick_values.first().copied().unwrap_or(min).min(min);
        let max = tick_values.last().copied().unwrap_or(max).max(max);
        (min, max, tick_values)
    };

    let pixel_span = options.pixel_span.max(1.0);
    let scale = LinearScale::new(min, max, pixel_span)
        .or_else(|_| LinearScale::new(fallback.0, fallback.1, pixel_span))
        .expect("fallback scalar domain is always valid");

    ScaleBuildResult {
        scale: Scale::Linear(scale),
        tick_values,
        best_tick_count,
        using_default_domain,
    }
}

fn build_ordinal_scale(options: &ScaleOptions) -> ScaleBuildResult {
    let (indices, using_default_domain) = match options.data_domain.as_ref() {
        Some(DataDomain::Ordinal(indices)) => (indices.clone(), false),
        // Scalar data handed to an ordinal axis still yields a usable
        // (empty) band domain rather than an error.
        Some(DataDomain::Scalar { .. }) | None => (Vec::new(), true),
    };

    let outer_padding_ratio = match options.category_thickness {
        Some(thickness) if thickness > 0.0 => options.outer_padding / thickness,
        _ => 0.0,
    };

    let pixel_span = options.pixel_span.max(0.0);
    let scale = BandScale::new(
        indices.len(),
        pixel_span,
        INNER_PADDING_RATIO,
        outer_padding_ratio,
    )
    .or_else(|_| BandScale::new(indices.len(), pixel_span, INNER_PADDING_RATIO, 0.0))
    .expect("band scale with zero outer padding is always valid");

    let best_tick_count = options
        .forced_tick_count
        .unwrap_or(options.max_tick_count)
        .min(indices.len().max(1));
    let tick_values = ticks::recommended_ordinal_ticks(
        best_tick_count as isize,
        &indices.iter().map(|index| *index as f64).collect::<Vec<_>>(),
    );

    ScaleBuildResult {
        scale: Scale::Band(scale),
        tick_values,
        best_tick_count,
        using_default_domain,
    }
}

/// Normalizes a scalar domain so a scale is never degenerate.
///
/// Returns the normalized bounds and whether the fixed fallback had to be
/// substituted.
#[must_use]
pub fn normalize_linear_domain(min: f64, max: f64, fallback: (f64, f64)) -> (f64, f64, bool) {
    if min.is_nan() || max.is_nan() {
        return (fallback.0, fallback.1, true);
    }

    let (mut min, mut max) = if min <= max { (min, max) } else { (max, min) };

    if min == max {
        if min == 0.0 {
            return (0.0, fallback.1, false);
        }
        let widen = min.abs() * DEGENERATE_DOMAIN_WIDEN_RATIO;
        return (min - widen, max + widen, false);
    }

    let span = max - min;
    if min != 0.0 && min.abs() <= span * DOMAIN_ZERO_SNAP_RATIO {
        min = 0.0;
    }
    if max != 0.0 && max.abs() <= span * DOMAIN_ZERO_SNAP_RATIO {
        max = 0.0;
    }

    (min, max, false)
}
