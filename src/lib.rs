//! dashchart - line, bar, area and pie charts for dashboards
//!
//! Draws small business charts in immediate mode onto any `DrawSurface`:
//! - Canvas 2D in the browser via WebAssembly
//! - Standalone SVG documents
//! - A recorded list of draw commands for tests and tooling
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { DashChart } from 'dashchart';
//! await init();
//! const chart = new DashChart(canvas, window.devicePixelRatio);
//! chart.setSpec({ type: 'pie', data: [{ name: 'Validated', value: 73.8 }] });
//! chart.render();
//! ```
//!
//! # Usage (Rust)
//!
//! ```
//! use dashchart::{render_svg, ChartConfig, ChartKind, ChartSpec, ChartStyle, DataPoint};
//!
//! let spec = ChartSpec::new(ChartKind::Bar)
//!     .with_points(vec![DataPoint::new().with("name", "Jan").with("value", 12)]);
//! let svg = render_svg(&spec, &ChartConfig::default(), &ChartStyle::default()).unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod error;
pub mod numfmt;
pub mod types;

// Rendering modules
pub mod render;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use error::{DashchartError, Result};
pub use render::{
    render_chart, CommandRecorder, DrawCommand, DrawSurface, RenderParams, SvgSurface, TextAlign,
    TextBaseline,
};
pub use types::*;
pub use viewer::ChartState;

#[cfg(target_arch = "wasm32")]
pub use viewer::DashChart;

/// Render a chart headlessly and return the draw commands it issued.
///
/// # Errors
/// Only surface failures produce errors; the recorder has none.
pub fn render_commands(
    spec: &ChartSpec,
    config: &ChartConfig,
    style: &ChartStyle,
) -> Result<Vec<DrawCommand>> {
    let mut recorder = CommandRecorder::new(f64::from(spec.width), f64::from(spec.height));
    render_chart(&mut recorder, &RenderParams::new(spec, config, style))?;
    Ok(recorder.into_commands())
}

/// Render a chart to a standalone SVG document.
///
/// # Errors
/// Only surface failures produce errors.
pub fn render_svg(spec: &ChartSpec, config: &ChartConfig, style: &ChartStyle) -> Result<String> {
    let mut svg = SvgSurface::new(f64::from(spec.width), f64::from(spec.height));
    render_chart(&mut svg, &RenderParams::new(spec, config, style))?;
    Ok(svg.to_svg())
}

/// Render a chart spec JSON string to an SVG document string
///
/// # Arguments
/// * `spec_json` - Chart spec (`{ data, type, xKey, yKeys, width, height }`)
///
/// # Errors
/// Returns an error if the spec JSON is invalid.
#[wasm_bindgen]
pub fn render_to_svg(spec_json: &str) -> std::result::Result<String, JsValue> {
    let spec = ChartSpec::from_json(spec_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    render_svg(&spec, &ChartConfig::default(), &ChartStyle::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
