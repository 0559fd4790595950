use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::core::format::{FormatterFactory, FormatterSpec, ValueFormatter};
use crate::core::scale::Scale;
use crate::core::scale_build::{self, ScaleOptions};
use crate::core::types::{AxisValueType, DataDomain};

/// Inputs to [`build_axis_properties`].
#[derive(Debug, Clone, PartialEq)]
pub struct AxisPropertiesOptions {
    pub pixel_span: f64,
    pub data_domain: Option<DataDomain>,
    pub value_type: AxisValueType,
    pub is_scalar: bool,
    pub is_vertical: bool,
    pub forced_tick_count: Option<usize>,
    pub max_tick_count: usize,
    pub outer_padding: f64,
    pub category_thickness: Option<f64>,
    /// Choose display units from the tick interval instead of the domain
    /// magnitude (typical for value axes).
    pub use_tick_interval_for_display_units: bool,
    /// Per-category display labels for ordinal text axes.
    pub category_labels: Option<Vec<String>>,
    /// Per-category raw values (date-as-ms) for ordinal date-time axes.
    pub category_values: Option<Vec<f64>>,
    pub min_tick_interval: Option<f64>,
    pub column_types: Vec<AxisValueType>,
}

impl AxisPropertiesOptions {
    #[must_use]
    pub fn new(pixel_span: f64, data_domain: Option<DataDomain>, value_type: AxisValueType) -> Self {
        Self {
            pixel_span,
            data_domain,
            value_type,
            is_scalar: value_type.supports_scalar(),
            is_vertical: false,
            forced_tick_count: None,
            max_tick_count: scale_build::DEFAULT_MAX_TICK_COUNT,
            outer_padding: 0.0,
            category_thickness: None,
            use_tick_interval_for_display_units: false,
            category_labels: None,
            category_values: None,
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
    pub fn with_vertical(mut self, is_vertical: bool) -> Self {
        self.is_vertical = is_vertical;
        self
    }

    #[must_use]
    pub fn with_category_labels(mut self, labels: Vec<String>) -> Self {
        self.category_labels = Some(labels);
        self
    }
}

/// Complete description of one axis: scale, ticks, formatted labels and the
/// geometry hints the layout solver needs.
///
/// Rebuilt wholesale on every data or viewport change; never mutated in
/// place, since a resize invalidates tick counts and rotation decisions.
#[derive(Clone)]
pub struct AxisProperties {
    pub scale: Scale,
    pub tick_values: Vec<f64>,
    pub tick_labels: Vec<String>,
    pub best_tick_count: usize,
    pub category_thickness: Option<f64>,
    pub is_category_axis: bool,
    pub using_default_domain: bool,
    /// Widest box one x-axis label may occupy without touching its neighbor.
    pub x_label_max_width: f64,
    /// Formatter the labels were produced with; kept so a scroll window can
    /// relabel a slice without changing formatting.
    pub formatter: Rc<dyn ValueFormatter>,
}

impl fmt::Debug for AxisProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisProperties")
            .field("scale", &self.scale)
            .field("tick_values", &self.tick_values)
            .field("tick_labels", &self.tick_labels)
            .field("best_tick_count", &self.best_tick_count)
            .field("category_thickness", &self.category_thickness)
            .field("is_category_axis", &self.is_category_axis)
            .field("using_default_domain", &self.using_default_domain)
            .field("x_label_max_width", &self.x_label_max_width)
            .finish_non_exhaustive()
    }
}

impl AxisProperties {
    /// Scalar domain bounds of the underlying scale, when linear.
    #[must_use]
    pub fn scalar_domain(&self) -> Option<(f64, f64)> {
        self.scale.as_linear().map(|linear| linear.domain())
    }
}

/// Composes the scale builder, tick generator and a value formatter into a
/// complete axis description. Pure function of its inputs.
#[must_use]
pub fn build_axis_properties(
    options: &AxisPropertiesOptions,
    factory: &dyn FormatterFactory,
) -> AxisProperties {
    let mut is_scalar = options.is_scalar;
    if is_scalar && !options.value_type.supports_scalar() {
        debug!(
            value_type = ?options.value_type,
            "scalar axis requested for non-scalar column; downgrading to ordinal"
        );
        is_scalar = false;
    }

    let scale_options = ScaleOptions {
        pixel_span: options.pixel_span,
        data_domain: options.data_domain.clone(),
        value_type: options.value_type,
        is_scalar,
        forced_tick_count: options.forced_tick_count,
        max_tick_count: options.max_tick_count,
        outer_padding: options.outer_padding,
        category_thickness: options.category_thickness,
        min_tick_interval: options.min_tick_interval,
        column_types: options.column_types.clone(),
    };
    let built = scale_build::build_scale(&scale_options);

    let formatter: Rc<dyn ValueFormatter> =
        Rc::from(factory.create(formatter_spec(options, is_scalar, &built.tick_values)));

    let tick_labels = label_ticks(options, is_scalar, &built.tick_values, formatter.as_ref());

    let category_thickness = if is_scalar {
        options.category_thickness
    } else {
        options
            .category_thickness
            .or_else(|| built.scale.as_band().map(|band| band.step()))
    };

    let x_label_max_width = x_label_max_width(
        options.pixel_span,
        is_scalar,
        options.category_thickness,
        built.tick_values.len(),
    );

    AxisProperties {
        scale: built.scale,
        tick_values: built.tick_values,
        tick_labels,
        best_tick_count: built.best_tick_count,
        category_thickness,
        is_category_axis: !is_scalar,
        using_default_domain: built.using_default_domain,
        x_label_max_width,
        formatter,
    }
}

/// Selects the formatter inputs for the axis kind.
///
/// Date-time scalar axes hand the formatter both domain endpoints; ordinal
/// date-time axes derive them from the per-category values; numeric axes may
/// pass the tick interval so display units follow it.
fn formatter_spec(
    options: &AxisPropertiesOptions,
    is_scalar: bool,
    tick_values: &[f64],
) -> FormatterSpec {
    let value_type = options.value_type;

    if options.value_type.is_date_time() {
        let (value, value2) = if is_scalar {
            scalar_bounds_or_ticks(options, tick_values)
        } else {
            category_value_bounds(options)
        };
        return FormatterSpec::new(value_type, value, value2, tick_values.len());
    }

    let (value, value2) = scalar_bounds_or_ticks(options, tick_values);
    let mut spec = FormatterSpec::new(value_type, value, value2, tick_values.len());
    if options.use_tick_interval_for_display_units && tick_values.len() > 1 {
        spec = spec.with_tick_interval((tick_values[1] - tick_values[0]).abs());
    }
    spec
}

fn scalar_bounds_or_ticks(options: &AxisPropertiesOptions, tick_values: &[f64]) -> (f64, f64) {
    options
        .data_domain
        .as_ref()
        .and_then(DataDomain::scalar_bounds)
        .unwrap_or_else(|| {
            let first = tick_values.first().copied().unwrap_or(0.0);
            let last = tick_values.last().copied().unwrap_or(0.0);
            (first, last)
        })
}

fn category_value_bounds(options: &AxisPropertiesOptions) -> (f64, f64) {
    let Some(values) = options.category_values.as_ref() else {
        return (0.0, 0.0);
    };
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in values {
        if value.is_finite() {
            min = min.min(*value);
            max = max.max(*value);
        }
    }
    if min > max { (0.0, 0.0) } else { (min, max) }
}

fn label_ticks(
    options: &AxisPropertiesOptions,
    is_scalar: bool,
    tick_values: &[f64],
    formatter: &dyn ValueFormatter,
) -> Vec<String> {
    if is_scalar {
        return tick_values.iter().map(|v| formatter.format(*v)).collect();
    }

    tick_values
        .iter()
        .map(|tick| {
            let index = *tick as usize;
            if let Some(values) = options.category_values.as_ref() {
                values
                    .get(index)
                    .map(|value| formatter.format(*value))
                    .unwrap_or_default()
            } else if let Some(labels) = options.category_labels.as_ref() {
                labels.get(index).cloned().unwrap_or_default()
            } else {
                formatter.format(*tick)
            }
        })
        .collect()
}

/// Widest per-label box on the x axis.
///
/// Non-scalar axes with a known thickness use it directly; otherwise the span
/// is divided by one more than the tick count so adjacent boxes never touch.
fn x_label_max_width(
    pixel_span: f64,
    is_scalar: bool,
    category_thickness: Option<f64>,
    tick_count: usize,
) -> f64 {
    if !is_scalar {
        if let Some(thickness) = category_thickness {
            return thickness;
        }
    }
    if tick_count > 1 {
        pixel_span / (tick_count + 1) as f64
    } else {
        pixel_span
    }
}
