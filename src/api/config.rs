use serde::{Deserialize, Serialize};

use crate::api::layout::LayoutTuning;
use crate::api::measure::FontSpec;
use crate::core::merge::MERGE_OVERLAP_THRESHOLD;
use crate::core::types::Viewport;
use crate::error::{AxisError, AxisResult};

/// Ordinal slot width below which the scrollbar takes over.
pub const MIN_ORDINAL_RECT_THICKNESS: f64 = 20.0;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartesianConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub x_is_scalar: bool,
    #[serde(default = "default_max_x_tick_count")]
    pub max_x_tick_count: usize,
    #[serde(default = "default_max_y_tick_count")]
    pub max_y_tick_count: usize,
    #[serde(default = "default_true")]
    pub scrollbar_enabled: bool,
    #[serde(default = "default_min_category_thickness")]
    pub min_category_thickness: f64,
    /// Overlap ratio two value domains need before sharing one axis.
    #[serde(default = "default_merge_overlap_threshold")]
    pub merge_overlap_threshold: f64,
    /// Always merge value axes, used when the host hides the secondary axis.
    #[serde(default)]
    pub force_merge_value_axes: bool,
    #[serde(default)]
    pub font: FontSpec,
    #[serde(default)]
    pub layout: LayoutTuning,
}

impl CartesianConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            x_is_scalar: false,
            max_x_tick_count: default_max_x_tick_count(),
            max_y_tick_count: default_max_y_tick_count(),
            scrollbar_enabled: default_true(),
            min_category_thickness: default_min_category_thickness(),
            merge_overlap_threshold: default_merge_overlap_threshold(),
            force_merge_value_axes: false,
            font: FontSpec::default(),
            layout: LayoutTuning::default(),
        }
    }

    #[must_use]
    pub fn with_scalar_x(mut self, x_is_scalar: bool) -> Self {
        self.x_is_scalar = x_is_scalar;
        self
    }

    #[must_use]
    pub fn with_scrollbar(mut self, enabled: bool) -> Self {
        self.scrollbar_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_force_merge(mut self, force_merge: bool) -> Self {
        self.force_merge_value_axes = force_merge;
        self
    }

    #[must_use]
    pub fn with_tick_budget(mut self, max_x: usize, max_y: usize) -> Self {
        self.max_x_tick_count = max_x;
        self.max_y_tick_count = max_y;
        self
    }

    pub fn validate(&self) -> AxisResult<()> {
        if !self.viewport.is_valid() {
            return Err(AxisError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.min_category_thickness.is_finite() || self.min_category_thickness <= 0.0 {
            return Err(AxisError::InvalidConfig(
                "minimum category thickness must be finite and > 0".to_owned(),
            ));
        }
        if !self.merge_overlap_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.merge_overlap_threshold)
        {
            return Err(AxisError::InvalidConfig(
                "merge overlap threshold must be within [0, 1]".to_owned(),
            ));
        }
        if !self.font.size_px.is_finite() || self.font.size_px <= 0.0 {
            return Err(AxisError::InvalidConfig(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.layout.validate().map(|_| ())
    }
}

fn default_true() -> bool {
    true
}

fn default_max_x_tick_count() -> usize {
    8
}

fn default_max_y_tick_count() -> usize {
    6
}

fn default_min_category_thickness() -> f64 {
    MIN_ORDINAL_RECT_THICKNESS
}

fn default_merge_overlap_threshold() -> f64 {
    MERGE_OVERLAP_THRESHOLD
}
