use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Plot margins in pixels, measured inward from the viewport edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    #[must_use]
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Minimal starting margin used before any label measurement has run.
    #[must_use]
    pub fn minimal() -> Self {
        Self::new(8.0, 1.0, 20.0, 1.0)
    }

    #[must_use]
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    #[must_use]
    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }
}

/// Column value type driving axis kind selection.
///
/// Text and boolean columns always produce ordinal axes; numeric, integer
/// and date-time columns may produce scalar axes when the caller asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisValueType {
    Text,
    Boolean,
    #[default]
    Numeric,
    Integer,
    DateTime,
}

impl AxisValueType {
    #[must_use]
    pub fn is_ordinal_only(self) -> bool {
        matches!(self, Self::Text | Self::Boolean)
    }

    #[must_use]
    pub fn supports_scalar(self) -> bool {
        !self.is_ordinal_only()
    }

    #[must_use]
    pub fn is_integer(self) -> bool {
        matches!(self, Self::Integer)
    }

    #[must_use]
    pub fn is_date_time(self) -> bool {
        matches!(self, Self::DateTime)
    }
}

/// Axis input domain: either a sequence of ordinal category indices or a
/// numeric/date-as-milliseconds `[min, max]` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataDomain {
    Ordinal(Vec<usize>),
    Scalar { min: f64, max: f64 },
}

impl DataDomain {
    #[must_use]
    pub fn scalar(min: f64, max: f64) -> Self {
        Self::Scalar { min, max }
    }

    /// Ordinal index domain `[0, count)`.
    #[must_use]
    pub fn ordinal_indices(count: usize) -> Self {
        Self::Ordinal((0..count).collect())
    }

    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar { .. })
    }

    #[must_use]
    pub fn scalar_bounds(&self) -> Option<(f64, f64)> {
        match self {
            Self::Scalar { min, max } => Some((*min, *max)),
            Self::Ordinal(_) => None,
        }
    }

    #[must_use]
    pub fn ordinal_len(&self) -> usize {
        match self {
            Self::Ordinal(indices) => indices.len(),
            Self::Scalar { .. } => 0,
        }
    }
}

/// Shared per-category geometry consumed by every chart layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryLayout {
    pub category_count: usize,
    pub category_thickness: f64,
    pub outer_padding_ratio: f64,
    pub is_scalar: bool,
}

/// Scrollbar extent as `[start, end]` pixel offsets into the scroll track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollExtent {
    pub start: f64,
    pub end: f64,
}

impl ScrollExtent {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.end - self.start
    }
}

/// Output contract of the value-domain merger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedValueAxisResult {
    pub domain: Option<(f64, f64)>,
    pub merged: bool,
    pub tick_count: usize,
    pub force_start_to_zero: bool,
}
