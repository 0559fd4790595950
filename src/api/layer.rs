use serde::{Deserialize, Serialize};

use crate::core::axis_props::{AxisProperties, AxisPropertiesOptions, build_axis_properties};
use crate::core::format::FormatterFactory;
use crate::core::scale_build::create_domain;
use crate::core::types::{AxisValueType, DataDomain};

/// Chart layer families the orchestrator can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Line,
    Column,
    Bar,
    Combo,
    Scatter,
    Waterfall,
    DataDot,
}

impl LayerKind {
    /// Whether marks of this family are anchored to a zero baseline, which
    /// forces the value domain to include zero.
    #[must_use]
    pub fn is_zero_anchored(self) -> bool {
        matches!(self, Self::Column | Self::Bar | Self::Combo | Self::Waterfall)
    }
}

/// One value series of a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSeries {
    pub name: String,
    pub values: Vec<f64>,
}

impl ValueSeries {
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Tabular input of one chart layer: categories plus 1..n value series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerData {
    pub category_labels: Vec<String>,
    /// Raw per-category values (date-as-ms or numeric) for scalar x axes.
    pub category_values: Option<Vec<f64>>,
    pub category_type: AxisValueType,
    pub series: Vec<ValueSeries>,
}

impl LayerData {
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.category_labels.len()
    }

    fn value_iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.series
            .iter()
            .flat_map(|series| series.values.iter().copied())
            .filter(|value| value.is_finite())
    }
}

/// Axis computation inputs handed to each layer by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerAxisOptions {
    pub x_pixel_span: f64,
    pub y_pixel_span: f64,
    pub x_is_scalar: bool,
    pub category_thickness: Option<f64>,
    pub outer_padding: f64,
    pub max_x_tick_count: usize,
    pub max_y_tick_count: usize,
    /// Value domain imposed by the domain merger, when this layer shares or
    /// aligns with the primary value axis.
    pub forced_y_domain: Option<(f64, f64)>,
    pub forced_y_tick_count: Option<usize>,
    /// Anchor the value domain start at zero even without a merge.
    pub force_y_start_to_zero: bool,
}

/// The `[xAxis, yAxis]` pair a layer reports for the shared solve.
#[derive(Debug, Clone)]
pub struct AxisPair {
    pub x: AxisProperties,
    pub y: AxisProperties,
}

/// Contract between the orchestrator and one chart layer.
///
/// Per-datapoint mark geometry is the host's business; `render` here only
/// has to honor the most recently overridden x scale and filtered window.
pub trait ChartLayer {
    fn kind(&self) -> LayerKind;

    fn category_count(&self) -> usize;

    fn category_labels(&self) -> &[String];

    /// Raw per-category values when the x column is scalar-capable.
    fn category_values(&self) -> Option<&[f64]>;

    fn category_value_type(&self) -> AxisValueType;

    /// Raw value-axis domain of this layer's data, before normalization.
    fn value_domain(&self) -> Option<(f64, f64)>;

    fn wants_secondary_axis(&self) -> bool;

    fn has_legend(&self) -> bool;

    /// Replaces this layer's tabular data, clearing any filtered window and
    /// overridden scale.
    fn set_data(&mut self, data: LayerData);

    fn calculate_axes_properties(
        &mut self,
        options: &LayerAxisOptions,
        factory: &dyn FormatterFactory,
    ) -> AxisPair;

    /// Replaces the x scale this layer renders into, after the shared solve.
    fn override_x_scale(&mut self, axis: &AxisProperties);

    /// Restricts rendered data to the half-open category range
    /// `[start, end_exclusive)`.
    fn set_filtered_data(&mut self, start: usize, end_exclusive: usize);

    fn render(&mut self, suppress_animations: bool);
}

/// Shared state and behavior of the built-in layers.
#[derive(Debug, Clone)]
pub struct LayerCore {
    kind: LayerKind,
    data: LayerData,
    secondary_axis: bool,
    filtered_range: Option<(usize, usize)>,
    overridden_x: Option<AxisProperties>,
    render_count: usize,
}

impl LayerCore {
    #[must_use]
    pub fn new(kind: LayerKind, data: LayerData) -> Self {
        Self {
            kind,
            data,
            secondary_axis: false,
            filtered_range: None,
            overridden_x: None,
            render_count: 0,
        }
    }

    #[must_use]
    pub fn with_secondary_axis(mut self, secondary: bool) -> Self {
        self.secondary_axis = secondary;
        self
    }

    #[must_use]
    pub fn data(&self) -> &LayerData {
        &self.data
    }

    pub fn set_data(&mut self, data: LayerData) {
        self.data = data;
        self.filtered_range = None;
        self.overridden_x = None;
    }

    #[must_use]
    pub fn filtered_range(&self) -> Option<(usize, usize)> {
        self.filtered_range
    }

    #[must_use]
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    fn raw_value_domain(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        if self.kind == LayerKind::Waterfall {
            // Waterfall marks stack deltas; the axis must cover the running
            // total, not the individual step sizes.
            let mut running = 0.0;
            min = 0.0;
            max = 0.0;
            for series in &self.data.series {
                for value in &series.values {
                    if value.is_finite() {
                        running += value;
                        min = min.min(running);
                        max = max.max(running);
                    }
                }
            }
            return Some((min, max));
        }

        for value in self.data.value_iter() {
            min = min.min(value);
            max = max.max(value);
        }
        if min > max {
            return None;
        }
        if self.kind.is_zero_anchored() {
            min = min.min(0.0);
            max = max.max(0.0);
        }
        Some((min, max))
    }

    fn calculate_axes(
        &self,
        options: &LayerAxisOptions,
        factory: &dyn FormatterFactory,
    ) -> AxisPair {
        let category_count = self.data.category_count();
        let x_domain = match (&self.data.category_values, options.x_is_scalar) {
            (Some(values), true) if self.data.category_type.supports_scalar() => {
                create_domain(values, category_count, self.data.category_type, true)
            }
            _ => DataDomain::ordinal_indices(category_count),
        };

        let mut x_options = AxisPropertiesOptions::new(
            options.x_pixel_span,
            Some(x_domain),
            self.data.category_type,
        )
        .with_scalar(options.x_is_scalar)
        .with_category_labels(self.data.category_labels.clone());
        x_options.category_values = self.data.category_values.clone();
        x_options.category_thickness = options.category_thickness;
        x_options.outer_padding = options.outer_padding;
        x_options.max_tick_count = options.max_x_tick_count;

        let x = build_axis_properties(&x_options, factory);

        let y_domain = options.forced_y_domain.or_else(|| {
            self.raw_value_domain().map(|(min, max)| {
                if options.force_y_start_to_zero && min >= 0.0 {
                    (0.0, max)
                } else {
                    (min, max)
                }
            })
        });

        let mut y_options = AxisPropertiesOptions::new(
            options.y_pixel_span,
            y_domain.map(|(min, max)| DataDomain::scalar(min, max)),
            AxisValueType::Numeric,
        )
        .with_vertical(true);
        y_options.max_tick_count = options.max_y_tick_count;
        y_options.forced_tick_count = options.forced_y_tick_count;
        y_options.use_tick_interval_for_display_units = true;

        let y = build_axis_properties(&y_options, factory);

        AxisPair { x, y }
    }
}

macro_rules! cartesian_layer {
    ($name:ident, $kind:expr, legend: $legend:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name {
            core: LayerCore,
        }

        impl $name {
            #[must_use]
            pub fn new(data: LayerData) -> Self {
                Self {
                    core: LayerCore::new($kind, data),
                }
            }

            #[must_use]
            pub fn with_secondary_axis(mut self, secondary: bool) -> Self {
                self.core = self.core.with_secondary_axis(secondary);
                self
            }

            #[must_use]
            pub fn core(&self) -> &LayerCore {
                &self.core
            }
        }

        impl ChartLayer for $name {
            fn kind(&self) -> LayerKind {
                $kind
            }

            fn category_count(&self) -> usize {
                self.core.data.category_count()
            }

            fn category_labels(&self) -> &[String] {
                &self.core.data.category_labels
            }

            fn category_values(&self) -> Option<&[f64]> {
                self.core.data.category_values.as_deref()
            }

            fn category_value_type(&self) -> AxisValueType {
                self.core.data.category_type
            }

            fn value_domain(&self) -> Option<(f64, f64)> {
                self.core.raw_value_domain()
            }

            fn wants_secondary_axis(&self) -> bool {
                self.core.secondary_axis
            }

            fn has_legend(&self) -> bool {
                $legend
            }

            fn set_data(&mut self, data: LayerData) {
                self.core.set_data(data);
            }

            fn calculate_axes_properties(
                &mut self,
                options: &LayerAxisOptions,
                factory: &dyn FormatterFactory,
            ) -> AxisPair {
                self.core.calculate_axes(options, factory)
            }

            fn override_x_scale(&mut self, axis: &AxisProperties) {
                self.core.overridden_x = Some(axis.clone());
            }

            fn set_filtered_data(&mut self, start: usize, end_exclusive: usize) {
                let end = end_exclusive.min(self.core.data.category_count());
                let start = start.min(end);
                self.core.filtered_range = Some((start, end));
            }

            fn render(&mut self, _suppress_animations: bool) {
                self.core.render_count += 1;
            }
        }
    };
}

cartesian_layer!(LineLayer, LayerKind::Line, legend: true);
cartesian_layer!(ColumnLayer, LayerKind::Column, legend: true);
cartesian_layer!(BarLayer, LayerKind::Bar, legend: true);
cartesian_layer!(ComboLayer, LayerKind::Combo, legend: true);
cartesian_layer!(ScatterLayer, LayerKind::Scatter, legend: true);
cartesian_layer!(WaterfallLayer, LayerKind::Waterfall, legend: true);
cartesian_layer!(DataDotLayer, LayerKind::DataDot, legend: false);
