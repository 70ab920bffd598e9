//! Rendering helpers shared by the integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use dashchart::render::{RecordedPath, RecordedRect, RecordedText};
use dashchart::{
    render_chart, ChartConfig, ChartSpec, ChartStyle, CommandRecorder, RenderParams, TextAlign,
};

/// Render `spec` with default style into a fresh recorder.
pub fn render(spec: &ChartSpec, config: &ChartConfig) -> CommandRecorder {
    render_styled(spec, config, &ChartStyle::default())
}

pub fn render_styled(spec: &ChartSpec, config: &ChartConfig, style: &ChartStyle) -> CommandRecorder {
    let mut rec = CommandRecorder::new(f64::from(spec.width), f64::from(spec.height));
    render_chart(&mut rec, &RenderParams::new(spec, config, style)).unwrap();
    rec
}

/// Series polylines: stroked paths in `color`.
pub fn stroked_paths(rec: &CommandRecorder, color: &str) -> Vec<RecordedPath> {
    rec.paths()
        .into_iter()
        .filter(|p| matches!(&p.stroke, Some((c, _)) if c == color))
        .collect()
}

/// Filled paths, e.g. pie slices and area fills.
pub fn filled_paths(rec: &CommandRecorder) -> Vec<RecordedPath> {
    rec.paths().into_iter().filter(|p| p.fill.is_some()).collect()
}

/// Rectangles in `color` wider than a legend swatch.
pub fn bars(rec: &CommandRecorder, color: &str, swatch: f64) -> Vec<RecordedRect> {
    rec.rects()
        .into_iter()
        .filter(|r| r.color == color && !(r.w == swatch && r.h == swatch))
        .collect()
}

pub fn texts_aligned(rec: &CommandRecorder, align: TextAlign) -> Vec<RecordedText> {
    rec.texts().into_iter().filter(|t| t.align == align).collect()
}

pub fn find_text(rec: &CommandRecorder, text: &str) -> Option<RecordedText> {
    rec.texts().into_iter().find(|t| t.text == text)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
