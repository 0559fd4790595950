pub mod config;
pub mod engine;
pub mod layer;
pub mod layout;
pub mod measure;
pub mod registry;
pub mod scroll;

pub use config::{CartesianConfig, MIN_ORDINAL_RECT_THICKNESS};
pub use engine::{
    CartesianEngine, OUTER_PADDING_RATIO, RenderPlan, ScrollbarState, compute_category_layout,
};
pub use layer::{
    AxisPair, BarLayer, ChartLayer, ColumnLayer, ComboLayer, DataDotLayer, LayerAxisOptions,
    LayerData, LayerKind, LineLayer, ScatterLayer, ValueSeries, WaterfallLayer,
};
pub use layout::{
    LayoutResult, LayoutTuning, MAX_LAYOUT_PASSES, ROTATION_DEGREES, SCROLLBAR_ROTATION_DEGREES,
    SolvedAxes, compute_layout,
};
pub use measure::{FontSpec, HeuristicTextMeasurer, TextMeasurer};
pub use registry::{LayerFactory, LayerRegistry};
pub use scroll::{ScrollWindow, virtualize_axis};
