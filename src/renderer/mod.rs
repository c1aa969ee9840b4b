//! Frame rendering module
//!
//! Serializes disk snapshots to SVG and hands them to a rasterizer.

pub mod raster;
pub mod svg;

pub use raster::{ConvertRasterizer, ConvertSettings, NoopRasterizer, Rasterizer};
pub use svg::{SvgStyle, render_svg};
