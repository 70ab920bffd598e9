//! Chart rendering over pluggable draw surfaces.
//!
//! This module provides:
//! - The `DrawSurface` trait (the Canvas 2D subset the drawers use)
//! - Canvas 2D, SVG and command-recording surfaces
//! - Geometry, axis, pie and legend drawers
//! - Color parsing and the series palette

mod axis;
pub mod canvas;
pub mod chart;
pub mod colors;
pub mod geometry;
pub mod legend;
pub mod pie;
pub mod recorder;
pub mod surface;
pub mod svg;

// Re-export commonly used types
pub use canvas::CanvasSurface;
pub use chart::{render_chart, RenderParams};
pub use colors::{palette_color, parse_color, series_color, CssColor, SERIES_PALETTE};
pub use geometry::Geometry;
pub use legend::{LegendEntry, LegendLayout};
pub use pie::{PieLayout, PieSlice};
pub use recorder::{CommandRecorder, DrawCommand, RecordedPath, RecordedRect, RecordedText};
pub use surface::{DrawSurface, TextAlign, TextBaseline};
pub use svg::SvgSurface;
