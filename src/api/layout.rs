use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::api::measure::{FontSpec, TextMeasurer};
use crate::core::axis_props::AxisProperties;
use crate::core::types::{Margin, Viewport};
use crate::error::{AxisError, AxisResult};

/// Upper bound on margin-negotiation passes.
///
/// There is no general convergence proof for the margin fixed point, so the
/// loop is explicitly bounded: one initial pass plus up to two corrective
/// passes (the second covers a rotation flip changing the bottom margin,
/// which can in turn change label truncation on the left).
pub const MAX_LAYOUT_PASSES: usize = 3;

/// X label rotation angle when labels do not fit upright.
pub const ROTATION_DEGREES: f64 = 35.0;

/// X label rotation angle when a scrollbar forces compact category slots.
pub const SCROLLBAR_ROTATION_DEGREES: f64 = 90.0;

/// Gap between a tick label and the plot edge.
pub const TICK_LABEL_PADDING: f64 = 2.0;

/// Rotated x labels never consume more than this fraction of the viewport
/// height.
pub const MAX_BOTTOM_MARGIN_RATIO: f64 = 0.25;

/// Tuning controls for the margin/rotation solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutTuning {
    pub rotation_enabled: bool,
    pub rotation_degrees: f64,
    pub scrollbar_rotation_degrees: f64,
    pub tick_label_padding: f64,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            rotation_enabled: true,
            rotation_degrees: ROTATION_DEGREES,
            scrollbar_rotation_degrees: SCROLLBAR_ROTATION_DEGREES,
            tick_label_padding: TICK_LABEL_PADDING,
        }
    }
}

impl LayoutTuning {
    pub fn validate(self) -> AxisResult<Self> {
        if !self.rotation_degrees.is_finite()
            || !self.scrollbar_rotation_degrees.is_finite()
            || !(0.0..=90.0).contains(&self.rotation_degrees)
            || !(0.0..=90.0).contains(&self.scrollbar_rotation_degrees)
        {
            return Err(AxisError::InvalidConfig(
                "rotation angles must be within [0, 90] degrees".to_owned(),
            ));
        }
        if !self.tick_label_padding.is_finite() || self.tick_label_padding < 0.0 {
            return Err(AxisError::InvalidConfig(
                "tick label padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// The axis set rebuilt on each negotiation pass.
#[derive(Debug, Clone)]
pub struct SolvedAxes {
    pub x: AxisProperties,
    pub y1: AxisProperties,
    pub y2: Option<AxisProperties>,
}

/// Immutable outcome of one layout solve.
///
/// The orchestrator holds only the latest result; nothing in here is ever
/// mutated in place.
#[derive(Debug, Clone)]
pub struct LayoutResult {
    pub axes: SolvedAxes,
    pub margin: Margin,
    pub will_rotate: bool,
    pub rotation_degrees: f64,
    pub plot_width: f64,
    pub plot_height: f64,
    pub passes: usize,
}

/// Negotiates margins and x-label rotation to a fixed point.
///
/// Axis geometry depends on the plot span, which depends on the margins,
/// which depend on measured label sizes of the axis geometry. The loop
/// recomputes axes at the current margin estimate, measures the resulting
/// labels, and stops as soon as the margins stop moving or
/// [`MAX_LAYOUT_PASSES`] is reached.
pub fn compute_layout<F>(
    viewport: Viewport,
    font: &FontSpec,
    measurer: &dyn TextMeasurer,
    tuning: LayoutTuning,
    scrollbar_visible: bool,
    mut build_axes: F,
) -> AxisResult<LayoutResult>
where
    F: FnMut(f64, f64) -> SolvedAxes,
{
    if !viewport.is_valid() {
        return Err(AxisError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    let tuning = tuning.validate()?;

    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);

    let mut margin = Margin::minimal();
    let mut result: Option<LayoutResult> = None;

    for pass in 1..=MAX_LAYOUT_PASSES {
        let plot_width = (width - margin.horizontal()).max(1.0);
        let plot_height = (height - margin.vertical()).max(1.0);
        let axes = build_axes(plot_width, plot_height);

        let will_rotate = tuning.rotation_enabled
            && x_labels_overflow(&axes.x, font, measurer);
        let rotation_degrees = if scrollbar_visible {
            tuning.scrollbar_rotation_degrees
        } else {
            tuning.rotation_degrees
        };

        let next_margin = measure_margins(
            &axes,
            font,
            measurer,
            tuning,
            height,
            will_rotate,
            rotation_degrees,
        );

        trace!(
            pass,
            left = next_margin.left,
            right = next_margin.right,
            bottom = next_margin.bottom,
            will_rotate,
            "layout pass"
        );

        let stable = margins_close(margin, next_margin) && result.is_some();
        margin = next_margin;
        let plot_width = (width - margin.horizontal()).max(1.0);
        let plot_height = (height - margin.vertical()).max(1.0);
        result = Some(LayoutResult {
            axes,
            margin,
            will_rotate,
            rotation_degrees: if will_rotate { rotation_degrees } else { 0.0 },
            plot_width,
            plot_height,
            passes: pass,
        });

        if stable {
            break;
        }
    }

    let result = result.expect("at least one layout pass always runs");
    debug!(
        passes = result.passes,
        will_rotate = result.will_rotate,
        left = result.margin.left,
        right = result.margin.right,
        bottom = result.margin.bottom,
        "layout solved"
    );
    Ok(result)
}

/// True when any x label is wider than its allotted per-category box.
fn x_labels_overflow(
    x_axis: &AxisProperties,
    font: &FontSpec,
    measurer: &dyn TextMeasurer,
) -> bool {
    x_axis
        .tick_labels
        .iter()
        .any(|label| measurer.measure(label, font) > x_axis.x_label_max_width)
}

fn measure_margins(
    axes: &SolvedAxes,
    font: &FontSpec,
    measurer: &dyn TextMeasurer,
    tuning: LayoutTuning,
    viewport_height: f64,
    will_rotate: bool,
    rotation_degrees: f64,
) -> Margin {
    let minimal = Margin::minimal();

    let left = longest_label_width(&axes.y1, font, measurer)
        .map(|width| width + tuning.tick_label_padding)
        .unwrap_or(minimal.left)
        .max(minimal.left);

    let right = axes
        .y2
        .as_ref()
        .and_then(|y2| longest_label_width(y2, font, measurer))
        .map(|width| width + tuning.tick_label_padding)
        .unwrap_or(minimal.right)
        .max(minimal.right);

    let bottom = x_axis_height(
        &axes.x,
        font,
        measurer,
        tuning,
        will_rotate,
        rotation_degrees,
    )
    .min(viewport_height * MAX_BOTTOM_MARGIN_RATIO)
    .max(minimal.bottom);

    Margin::new(minimal.top, right, bottom, left)
}

fn longest_label_width(
    axis: &AxisProperties,
    font: &FontSpec,
    measurer: &dyn TextMeasurer,
) -> Option<f64> {
    axis.tick_labels
        .iter()
        .map(|label| OrderedFloat(measurer.measure(label, font)))
        .max()
        .map(OrderedFloat::into_inner)
}

/// Vertical space the x-axis labels need below the plot.
fn x_axis_height(
    x_axis: &AxisProperties,
    font: &FontSpec,
    measurer: &dyn TextMeasurer,
    tuning: LayoutTuning,
    will_rotate: bool,
    rotation_degrees: f64,
) -> f64 {
    let upright = font.size_px + tuning.tick_label_padding * 2.0;
    if !will_rotate {
        return upright + font.size_px;
    }

    let longest = longest_label_width(x_axis, font, measurer).unwrap_or(0.0);
    let angle = rotation_degrees.to_radians();
    upright + longest * angle.sin()
}

fn margins_close(left: Margin, right: Margin) -> bool {
    const EPSILON: f64 = 0.01;
    (left.top - right.top).abs() < EPSILON
        && (left.right - right.right).abs() < EPSILON
        && (left.bottom - right.bottom).abs() < EPSILON
        && (left.left - right.left).abs() < EPSILON
}
