use serde::{Deserialize, Serialize};

use crate::error::{AxisError, AxisResult};

/// Continuous scale mapping a numeric domain onto `[0, pixel_span]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    pixel_span: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64, pixel_span: f64) -> AxisResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(AxisError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !pixel_span.is_finite() || pixel_span <= 0.0 {
            return Err(AxisError::InvalidData(
                "scale pixel span must be finite and > 0".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            pixel_span,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (0.0, self.pixel_span)
    }

    /// Maps a domain value to its pixel offset within the span.
    #[must_use]
    pub fn scale(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        (value - self.domain_start) / span * self.pixel_span
    }

    /// Maps a pixel offset back into domain space.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        self.domain_start + pixel / self.pixel_span * span
    }
}

/// Ordinal band scale mapping category indices onto padded pixel slots.
///
/// Slot geometry follows the usual band-scale conventions: the span is cut
/// into `count` steps, shrunk by `inner_padding` between bands and
/// `outer_padding` steps on each edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    domain_len: usize,
    pixel_span: f64,
    inner_padding: f64,
    outer_padding: f64,
}

impl BandScale {
    pub fn new(
        domain_len: usize,
        pixel_span: f64,
        inner_padding: f64,
        outer_padding: f64,
    ) -> AxisResult<Self> {
        if !pixel_span.is_finite() || pixel_span < 0.0 {
            return Err(AxisError::InvalidData(
                "band scale pixel span must be finite and >= 0".to_owned(),
            ));
        }
        if !inner_padding.is_finite()
            || !outer_padding.is_finite()
            || !(0.0..1.0).contains(&inner_padding)
            || outer_padding < 0.0
        {
            return Err(AxisError::InvalidData(
                "band scale paddings must be finite, inner in [0,1), outer >= 0".to_owned(),
            ));
        }

        Ok(Self {
            domain_len,
            pixel_span,
            inner_padding,
            outer_padding,
        })
    }

    #[must_use]
    pub fn domain_len(self) -> usize {
        self.domain_len
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (0.0, self.pixel_span)
    }

    #[must_use]
    pub fn outer_padding(self) -> f64 {
        self.outer_padding
    }

    /// Distance between the starts of two adjacent bands.
    #[must_use]
    pub fn step(self) -> f64 {
        let n = self.domain_len as f64;
        let divisor = n - self.inner_padding + 2.0 * self.outer_padding;
        if divisor <= 0.0 {
            return 0.0;
        }
        self.pixel_span / divisor
    }

    /// Width of one band after inner padding is removed.
    #[must_use]
    pub fn bandwidth(self) -> f64 {
        self.step() * (1.0 - self.inner_padding)
    }

    /// Pixel offset of the start of the band at `index`.
    #[must_use]
    pub fn position(self, index: usize) -> f64 {
        let step = self.step();
        step * self.outer_padding + step * index as f64
    }

    /// Pixel offset of the center of the band at `index`.
    #[must_use]
    pub fn center(self, index: usize) -> f64 {
        self.position(index) + self.bandwidth() / 2.0
    }
}

/// A renderable axis scale: either continuous or banded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Scale {
    Linear(LinearScale),
    Band(BandScale),
}

impl Scale {
    #[must_use]
    pub fn is_ordinal(&self) -> bool {
        matches!(self, Self::Band(_))
    }

    #[must_use]
    pub fn as_linear(&self) -> Option<LinearScale> {
        match self {
            Self::Linear(linear) => Some(*linear),
            Self::Band(_) => None,
        }
    }

    #[must_use]
    pub fn as_band(&self) -> Option<BandScale> {
        match self {
            Self::Band(band) => Some(*band),
            Self::Linear(_) => None,
        }
    }

    /// Pixel position for a tick value.
    ///
    /// Linear scales interpret `value` in domain units; band scales interpret
    /// it as a category index and return the band center.
    #[must_use]
    pub fn tick_position(&self, value: f64) -> f64 {
        match self {
            Self::Linear(linear) => linear.scale(value),
            Self::Band(band) => band.center(value as usize),
        }
    }

    #[must_use]
    pub fn pixel_span(&self) -> f64 {
        match self {
            Self::Linear(linear) => linear.range().1,
            Self::Band(band) => band.range().1,
        }
    }
}
