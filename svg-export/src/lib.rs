#![warn(clippy::all, rust_2018_idioms)]

//! Static SVG snapshots of a scatter chart. Everything handed to this crate
//! is already in pixel coordinates of the chart area; scaling data is the
//! caller's business.

mod plotting;
mod svg;

pub use plotting::{AxisSide, Figure, LabelEntry, LabelGroup, Margin, Marker, Scatter, Tick};
