//! cartesian-rs: axis and layout solver for multi-layered Cartesian charts.
//!
//! This crate computes the shared geometry of 1–2 chart layers over a common
//! category/value axis pair: scales, tick sets, formatted labels, margins,
//! label rotation and scroll-window virtualization. Shape drawing, legends
//! and text rasterization stay on the host side behind narrow interfaces.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{CartesianConfig, CartesianEngine, RenderPlan};
pub use error::{AxisError, AxisResult};
