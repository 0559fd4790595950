use tracing::trace;

use crate::core::axis_props::AxisProperties;
use crate::core::scale::{BandScale, Scale};
use crate::core::scale_build::INNER_PADDING_RATIO;
use crate::core::ticks::recommended_ordinal_ticks;
use crate::core::types::ScrollExtent;
use crate::error::{AxisError, AxisResult};

/// Maps a scrollbar extent to a contiguous slice of the ordinal category
/// domain.
///
/// The virtualizer keeps the *full* domain geometry for the scrollbar thumb;
/// the rendered axis is rebuilt over just the visible slice via
/// [`virtualize_axis`]. Every call is an independent pure computation over
/// the current extent, so rapid repeated drag events are safe.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollWindow {
    track_length: f64,
    full_category_count: usize,
    category_thickness: f64,
    extent: ScrollExtent,
}

impl ScrollWindow {
    /// `category_thickness` is the compact per-category width the scrollbar
    /// guarantees; `track_length * count / thickness` would be the full
    /// unscrolled content length.
    pub fn new(
        track_length: f64,
        full_category_count: usize,
        category_thickness: f64,
    ) -> AxisResult<Self> {
        if !track_length.is_finite() || track_length <= 0.0 {
            return Err(AxisError::InvalidConfig(
                "scroll track length must be finite and > 0".to_owned(),
            ));
        }
        if full_category_count == 0 {
            return Err(AxisError::InvalidData(
                "scroll window requires at least one category".to_owned(),
            ));
        }
        if !category_thickness.is_finite() || category_thickness <= 0.0 {
            return Err(AxisError::InvalidConfig(
                "scroll category thickness must be finite and > 0".to_owned(),
            ));
        }

        let mut window = Self {
            track_length,
            full_category_count,
            category_thickness,
            extent: ScrollExtent::new(0.0, 0.0),
        };
        window.extent = ScrollExtent::new(0.0, window.minimum_extent_length());
        Ok(window)
    }

    /// Pixel step of one category on the full-domain thumb scale.
    #[must_use]
    pub fn pixel_step(&self) -> f64 {
        self.track_length / self.full_category_count as f64
    }

    /// Shortest draggable extent.
    ///
    /// Derived as `track^2 / full_content_length`, so the window never
    /// becomes narrower than is meaningful to drag.
    #[must_use]
    pub fn minimum_extent_length(&self) -> f64 {
        let full_content_length = (self.category_thickness * self.full_category_count as f64)
            .max(self.track_length);
        (self.track_length * self.track_length / full_content_length).min(self.track_length)
    }

    #[must_use]
    pub fn extent(&self) -> ScrollExtent {
        self.extent
    }

    /// Applies a brush/drag extent, clamping it to the track and to the
    /// minimum span.
    pub fn set_extent(&mut self, extent: ScrollExtent) {
        let minimum = self.minimum_extent_length();
        let length = extent.length().max(minimum).min(self.track_length);
        let start = extent.start.clamp(0.0, self.track_length - length);
        self.extent = ScrollExtent::new(start, start + length);
        trace!(
            start = self.extent.start,
            end = self.extent.end,
            "scroll extent updated"
        );
    }

    /// Current visible half-open index range `[start, end)` into the full
    /// ordinal category domain.
    #[must_use]
    pub fn visible_slice(&self) -> (usize, usize) {
        let step = self.pixel_step();
        let start = (self.extent.start / step).floor() as usize;
        let count = ((self.extent.length() / step).ceil() as usize).max(1);
        let start = start.min(self.full_category_count.saturating_sub(1));
        let end = (start + count).min(self.full_category_count);
        (start, end)
    }
}

/// Rebuilds an ordinal axis over only the visible category slice.
///
/// The original axis's formatter is reused unchanged so label formatting
/// stays stable while scrolling; only the tick values and labels are
/// re-derived from the slice.
#[must_use]
pub fn virtualize_axis(
    full_axis: &AxisProperties,
    category_labels: &[String],
    category_values: Option<&[f64]>,
    slice: (usize, usize),
    pixel_span: f64,
    max_tick_count: usize,
) -> AxisProperties {
    let (start, end) = slice;
    let end = end.min(category_labels.len().max(start));
    let slice_len = end.saturating_sub(start);

    let scale = BandScale::new(
        slice_len,
        pixel_span.max(0.0),
        INNER_PADDING_RATIO,
        full_axis
            .scale
            .as_band()
            .map(BandScale::outer_padding)
            .unwrap_or(0.0),
    )
    .unwrap_or_else(|_| {
        BandScale::new(slice_len, pixel_span.max(0.0), INNER_PADDING_RATIO, 0.0)
            .expect("zero-padding band scale is always valid")
    });

    let indices: Vec<f64> = (start..end).map(|index| index as f64).collect();
    let tick_values = recommended_ordinal_ticks(max_tick_count as isize, &indices);

    let tick_labels: Vec<String> = tick_values
        .iter()
        .map(|tick| {
            let index = *tick as usize;
            match category_values {
                Some(values) => values
                    .get(index)
                    .map(|value| full_axis.formatter.format(*value))
                    .unwrap_or_default(),
                None => category_labels.get(index).cloned().unwrap_or_default(),
            }
        })
        .collect();

    // Tick values are re-based onto the slice so they index the new scale.
    let rebased_ticks: Vec<f64> = tick_values
        .iter()
        .map(|tick| tick - start as f64)
        .collect();

    AxisProperties {
        scale: Scale::Band(scale),
        tick_values: rebased_ticks,
        tick_labels,
        best_tick_count: full_axis.best_tick_count,
        category_thickness: Some(scale.step()),
        is_category_axis: true,
        using_default_domain: full_axis.using_default_domain,
        x_label_max_width: scale.step(),
        formatter: full_axis.formatter.clone(),
    }
}
