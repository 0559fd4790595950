pub mod axis_props;
pub mod format;
pub mod merge;
pub mod scale;
pub mod scale_build;
pub mod ticks;
pub mod types;

pub use axis_props::{AxisProperties, AxisPropertiesOptions, build_axis_properties};
pub use format::{DefaultFormatterFactory, FormatterFactory, FormatterSpec, ValueFormatter};
pub use merge::{MERGE_OVERLAP_THRESHOLD, merge_value_domains};
pub use scale::{BandScale, LinearScale, Scale};
pub use scale_build::{ScaleBuildResult, ScaleOptions, build_scale, create_domain};
pub use types::{
    AxisValueType, CategoryLayout, DataDomain, Margin, MergedValueAxisResult, ScrollExtent,
    Viewport,
};
