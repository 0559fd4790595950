use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::api::config::CartesianConfig;
use crate::api::layer::{ChartLayer, LayerAxisOptions, LayerData, LayerKind};
use crate::api::layout::{self, SolvedAxes};
use crate::api::measure::{HeuristicTextMeasurer, TextMeasurer};
use crate::api::registry::LayerRegistry;
use crate::api::scroll::{ScrollWindow, virtualize_axis};
use crate::core::axis_props::AxisProperties;
use crate::core::format::{DefaultFormatterFactory, FormatterFactory};
use crate::core::merge::merge_value_domains;
use crate::core::scale_build::INNER_PADDING_RATIO;
use crate::core::types::{
    CategoryLayout, Margin, MergedValueAxisResult, ScrollExtent, Viewport,
};
use crate::error::{AxisError, AxisResult};

/// Outer padding on each edge of an ordinal axis, as a ratio of the band step.
pub const OUTER_PADDING_RATIO: f64 = 0.4;

/// Scrollbar state surfaced to the host alongside the axis geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarState {
    pub extent: ScrollExtent,
    pub minimum_extent: f64,
    pub visible_range: (usize, usize),
}

/// Final output of one engine update: everything a host needs to render the
/// frame. Fully replaced on every pass, never mutated in place.
#[derive(Debug, Clone)]
pub struct RenderPlan {
    /// X axis the layers render into (restricted to the visible slice when a
    /// scrollbar is active).
    pub x_axis: AxisProperties,
    pub y1_axis: AxisProperties,
    pub y2_axis: Option<AxisProperties>,
    pub margin: Margin,
    pub category_layout: CategoryLayout,
    pub merged_value_axis: Option<MergedValueAxisResult>,
    pub will_rotate: bool,
    pub rotation_degrees: f64,
    pub scrollbar: Option<ScrollbarState>,
    pub plot_width: f64,
    pub plot_height: f64,
}

/// Derives the shared per-category geometry for one update pass, and whether
/// the full domain fits without a scrollbar.
#[must_use]
pub fn compute_category_layout(
    category_count: usize,
    available_span: f64,
    is_scalar: bool,
    scrollbar_enabled: bool,
    min_category_thickness: f64,
) -> (CategoryLayout, bool) {
    let count = category_count.max(1);
    if is_scalar {
        let layout = CategoryLayout {
            category_count,
            category_thickness: available_span / count as f64,
            outer_padding_ratio: 0.0,
            is_scalar: true,
        };
        return (layout, false);
    }

    let divisor = count as f64 - INNER_PADDING_RATIO + 2.0 * OUTER_PADDING_RATIO;
    let natural_step = if divisor > 0.0 {
        available_span / divisor
    } else {
        available_span
    };

    let needs_scrollbar = natural_step < min_category_thickness;
    let category_thickness = if needs_scrollbar && scrollbar_enabled {
        min_category_thickness
    } else {
        natural_step
    };

    let layout = CategoryLayout {
        category_count,
        category_thickness,
        outer_padding_ratio: OUTER_PADDING_RATIO,
        is_scalar: false,
    };
    (layout, needs_scrollbar && scrollbar_enabled)
}

/// Orchestrates 1–2 chart layers over a shared pair of category/value axes.
///
/// Single-threaded and synchronous: each `update` is a bounded pure
/// computation, and the cached [`RenderPlan`] is replaced wholesale so there
/// is never a partially updated frame.
pub struct CartesianEngine {
    config: CartesianConfig,
    registry: LayerRegistry,
    layers: SmallVec<[Box<dyn ChartLayer>; 2]>,
    formatter_factory: Box<dyn FormatterFactory>,
    measurer: Box<dyn TextMeasurer>,
    scroll: Option<ScrollWindow>,
    full_x_axis: Option<AxisProperties>,
    latest: Option<RenderPlan>,
}

impl CartesianEngine {
    pub fn new(config: CartesianConfig) -> AxisResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            registry: LayerRegistry::default(),
            layers: SmallVec::new(),
            formatter_factory: Box::new(DefaultFormatterFactory),
            measurer: Box::new(HeuristicTextMeasurer),
            scroll: None,
            full_x_axis: None,
            latest: None,
        })
    }

    #[must_use]
    pub fn with_formatter_factory(mut self, factory: Box<dyn FormatterFactory>) -> Self {
        self.formatter_factory = factory;
        self
    }

    #[must_use]
    pub fn with_text_measurer(mut self, measurer: Box<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    #[must_use]
    pub fn config(&self) -> &CartesianConfig {
        &self.config
    }

    pub fn registry_mut(&mut self) -> &mut LayerRegistry {
        &mut self.registry
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn layers(&self) -> &[Box<dyn ChartLayer>] {
        &self.layers
    }

    #[must_use]
    pub fn latest_plan(&self) -> Option<&RenderPlan> {
        self.latest.as_ref()
    }

    /// Adds a chart layer built from the registry. At most two layers share
    /// the axis pair.
    pub fn add_layer(&mut self, kind: LayerKind, data: LayerData) -> AxisResult<()> {
        if self.layers.len() >= 2 {
            return Err(AxisError::InvalidConfig(
                "a cartesian chart hosts at most two layers".to_owned(),
            ));
        }
        let categories = data.category_count();
        let layer = self.registry.create(kind, data)?;
        self.layers.push(layer);
        debug!(?kind, categories, layer_count = self.layers.len(), "layer added");
        Ok(())
    }

    pub fn replace_layer(
        &mut self,
        index: usize,
        kind: LayerKind,
        data: LayerData,
    ) -> AxisResult<()> {
        if index >= self.layers.len() {
            return Err(AxisError::InvalidConfig(format!(
                "no layer at index {index}"
            )));
        }
        let layer = self.registry.create(kind, data)?;
        self.layers[index] = layer;
        debug!(?kind, index, "layer replaced");
        Ok(())
    }

    /// Swaps the data of an existing layer without rebuilding it.
    pub fn set_layer_data(&mut self, index: usize, data: LayerData) -> AxisResult<()> {
        let Some(layer) = self.layers.get_mut(index) else {
            return Err(AxisError::InvalidConfig(format!(
                "no layer at index {index}"
            )));
        };
        let categories = data.category_count();
        layer.set_data(data);
        debug!(index, categories, "layer data replaced");
        Ok(())
    }

    pub fn remove_secondary_layer(&mut self) {
        if self.layers.len() == 2 {
            self.layers.pop();
            debug!("secondary layer removed");
        }
    }

    /// Runs one full update cycle: per-layer domains, value-domain merge,
    /// axis building, margin negotiation, scroll virtualization and layer
    /// rendering.
    pub fn update(
        &mut self,
        viewport: Viewport,
        suppress_animations: bool,
    ) -> AxisResult<RenderPlan> {
        if !viewport.is_valid() {
            return Err(AxisError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if self.layers.is_empty() {
            return Err(AxisError::InvalidConfig(
                "engine update requires at least one layer".to_owned(),
            ));
        }
        self.config.viewport = viewport;

        let x_is_scalar = self.config.x_is_scalar
            && self
                .layers
                .first()
                .map(|layer| layer.category_value_type().supports_scalar())
                .unwrap_or(false);

        let category_count = self
            .layers
            .iter()
            .map(|layer| layer.category_count())
            .max()
            .unwrap_or(0);

        // Scrollbar visibility is decided up front from the viewport-level
        // span estimate; margin negotiation reacts to it (90° labels) rather
        // than deciding it.
        let minimal = Margin::minimal();
        let estimated_span = (f64::from(viewport.width) - minimal.horizontal()).max(1.0);
        let (_, scrollbar_visible) = compute_category_layout(
            category_count,
            estimated_span,
            x_is_scalar,
            self.config.scrollbar_enabled,
            self.config.min_category_thickness,
        );

        let merged = self.merge_for_update();

        let layers = &mut self.layers;
        let factory = self.formatter_factory.as_ref();
        let config = &self.config;
        let merged_ref = merged.as_ref();

        let mut category_layout = CategoryLayout {
            category_count,
            category_thickness: 0.0,
            outer_padding_ratio: OUTER_PADDING_RATIO,
            is_scalar: x_is_scalar,
        };

        let layout_result = layout::compute_layout(
            viewport,
            &config.font,
            self.measurer.as_ref(),
            config.layout,
            scrollbar_visible,
            |x_span, y_span| {
                let (pass_layout, _) = compute_category_layout(
                    category_count,
                    x_span,
                    x_is_scalar,
                    config.scrollbar_enabled,
                    config.min_category_thickness,
                );
                category_layout = pass_layout;

                let thickness =
                    (!x_is_scalar).then_some(pass_layout.category_thickness);
                let outer_padding =
                    pass_layout.category_thickness * pass_layout.outer_padding_ratio;

                let two_layers = layers.len() == 2;
                let forced_primary = merged_ref.and_then(|m| m.domain);
                let forced_tick_count = merged_ref
                    .filter(|_| two_layers)
                    .map(|m| m.tick_count);
                let force_zero = merged_ref
                    .map(|m| m.force_start_to_zero)
                    .unwrap_or(false);

                let primary_options = LayerAxisOptions {
                    x_pixel_span: x_span,
                    y_pixel_span: y_span,
                    x_is_scalar,
                    category_thickness: thickness,
                    outer_padding,
                    max_x_tick_count: config.max_x_tick_count,
                    max_y_tick_count: config.max_y_tick_count,
                    forced_y_domain: forced_primary,
                    forced_y_tick_count: forced_tick_count,
                    force_y_start_to_zero: force_zero,
                };

                let primary_pair =
                    layers[0].calculate_axes_properties(&primary_options, factory);

                let y2 = if two_layers {
                    let is_merged = merged_ref.map(|m| m.merged).unwrap_or(false);
                    let secondary_options = LayerAxisOptions {
                        forced_y_domain: if is_merged { forced_primary } else { None },
                        ..primary_options.clone()
                    };
                    let secondary_pair =
                        layers[1].calculate_axes_properties(&secondary_options, factory);
                    (!is_merged).then_some(secondary_pair.y)
                } else {
                    None
                };

                SolvedAxes {
                    x: primary_pair.x,
                    y1: primary_pair.y,
                    y2,
                }
            },
        )?;

        let full_x = layout_result.axes.x.clone();
        let plot_width = layout_result.plot_width;

        let (x_axis, scrollbar) = if scrollbar_visible && category_count > 0 {
            self.apply_scroll_window(&full_x, plot_width, category_count)?
        } else {
            self.scroll = None;
            for layer in &mut self.layers {
                layer.set_filtered_data(0, category_count);
                layer.override_x_scale(&full_x);
            }
            (full_x.clone(), None)
        };

        for layer in &mut self.layers {
            layer.render(suppress_animations);
        }

        let plan = RenderPlan {
            x_axis,
            y1_axis: layout_result.axes.y1.clone(),
            y2_axis: layout_result.axes.y2.clone(),
            margin: layout_result.margin,
            category_layout,
            merged_value_axis: merged,
            will_rotate: layout_result.will_rotate,
            rotation_degrees: layout_result.rotation_degrees,
            scrollbar,
            plot_width: layout_result.plot_width,
            plot_height: layout_result.plot_height,
        };

        debug!(
            layers = self.layers.len(),
            plot_width = plan.plot_width,
            plot_height = plan.plot_height,
            scrollbar = plan.scrollbar.is_some(),
            merged = plan
                .merged_value_axis
                .as_ref()
                .map(|m| m.merged)
                .unwrap_or(false),
            "engine update complete"
        );

        self.full_x_axis = Some(full_x);
        self.latest = Some(plan.clone());
        Ok(plan)
    }

    /// Applies a scrollbar brush/drag extent and re-derives the visible
    /// window without recomputing margins or value axes.
    pub fn set_scroll_extent(&mut self, extent: ScrollExtent) -> AxisResult<RenderPlan> {
        let Some(window) = self.scroll.as_mut() else {
            return Err(AxisError::InvalidConfig(
                "no active scrollbar to scroll".to_owned(),
            ));
        };
        let Some(full_x) = self.full_x_axis.clone() else {
            return Err(AxisError::InvalidConfig(
                "scroll requires a completed update pass".to_owned(),
            ));
        };
        let Some(mut plan) = self.latest.clone() else {
            return Err(AxisError::InvalidConfig(
                "scroll requires a completed update pass".to_owned(),
            ));
        };

        window.set_extent(extent);
        let slice = window.visible_slice();
        let scrollbar = ScrollbarState {
            extent: window.extent(),
            minimum_extent: window.minimum_extent_length(),
            visible_range: slice,
        };
        trace!(start = slice.0, end = slice.1, "scroll slice updated");

        let labels = self.layers[0].category_labels().to_vec();
        let values = self.primary_category_values();
        let x_axis = virtualize_axis(
            &full_x,
            &labels,
            values.as_deref(),
            slice,
            plan.plot_width,
            self.config.max_x_tick_count,
        );

        for layer in &mut self.layers {
            layer.set_filtered_data(slice.0, slice.1);
            layer.override_x_scale(&x_axis);
            layer.render(true);
        }

        plan.x_axis = x_axis;
        plan.scrollbar = Some(scrollbar);
        self.latest = Some(plan.clone());
        Ok(plan)
    }

    fn merge_for_update(&self) -> Option<MergedValueAxisResult> {
        if self.layers.len() != 2 {
            return None;
        }
        let domain1 = self.layers[0].value_domain();
        let domain2 = self.layers[1].value_domain();
        let result = merge_value_domains(
            domain1,
            domain2,
            self.config.max_y_tick_count,
            self.config.max_y_tick_count,
            self.config.force_merge_value_axes || !self.layers[1].wants_secondary_axis(),
            self.config.merge_overlap_threshold,
        );
        if domain1.is_none() || domain2.is_none() {
            warn!("value-domain merge skipped: a layer has no usable values");
        }
        Some(result)
    }

    fn apply_scroll_window(
        &mut self,
        full_x: &AxisProperties,
        plot_width: f64,
        category_count: usize,
    ) -> AxisResult<(AxisProperties, Option<ScrollbarState>)> {
        let previous_extent = self.scroll.as_ref().map(ScrollWindow::extent);
        let mut window = ScrollWindow::new(
            plot_width,
            category_count,
            self.config.min_category_thickness,
        )?;
        if let Some(extent) = previous_extent {
            window.set_extent(extent);
        }

        let slice = window.visible_slice();
        let scrollbar = ScrollbarState {
            extent: window.extent(),
            minimum_extent: window.minimum_extent_length(),
            visible_range: slice,
        };

        let labels = self.layers[0].category_labels().to_vec();
        let values = self.primary_category_values();
        let x_axis = virtualize_axis(
            full_x,
            &labels,
            values.as_deref(),
            slice,
            plot_width,
            self.config.max_x_tick_count,
        );

        for layer in &mut self.layers {
            layer.set_filtered_data(slice.0, slice.1);
            layer.override_x_scale(&x_axis);
        }

        self.scroll = Some(window);
        Ok((x_axis, Some(scrollbar)))
    }

    fn primary_category_values(&self) -> Option<Vec<f64>> {
        self.layers
            .first()
            .and_then(|layer| layer.category_values().map(<[f64]>::to_vec))
    }
}
