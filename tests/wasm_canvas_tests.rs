//! Browser tests for the canvas adapter.
//!
//! Run with: wasm-pack test --headless --chrome
#![cfg(target_arch = "wasm32")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use dashchart::render::{render_chart, CanvasSurface, DrawSurface, RenderParams};
use dashchart::{render_to_svg, ChartConfig, ChartKind, ChartSpec, ChartStyle, DashChart};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

const SPEC: &str = r#"{
    "type": "bar",
    "xKey": "month",
    "yKeys": ["social", "news"],
    "className": "chart",
    "data": [
        {"month": "Jun", "social": 42, "news": 12},
        {"month": "Jul", "social": 45, "news": 15}
    ]
}"#;

#[wasm_bindgen_test]
fn chart_sizes_canvas_by_dpr() {
    let canvas = canvas();
    let mut chart = DashChart::new(canvas.clone(), 2.0).unwrap();
    chart.set_spec_json(SPEC).unwrap();
    chart.render().unwrap();

    assert_eq!((canvas.width(), canvas.height()), (1000, 600));
    assert_eq!(canvas.style().get_property_value("width").unwrap(), "500px");
    assert_eq!(canvas.class_name(), "chart");
    assert!(!chart.needs_render());
}

#[wasm_bindgen_test]
fn resize_marks_dirty() {
    let mut chart = DashChart::new(canvas(), 1.0).unwrap();
    chart.render().unwrap();
    assert!(!chart.needs_render());
    chart.resize(320, 200);
    assert!(chart.needs_render());
    chart.render().unwrap();
    assert!(!chart.needs_render());
}

#[wasm_bindgen_test]
fn canvas_surface_measures_text() {
    let mut surface = CanvasSurface::new(&canvas()).unwrap();
    surface.set_font("12px sans-serif");
    let short = surface.measure_text("Jun").unwrap();
    let long = surface.measure_text("Consumer Complaints").unwrap();
    assert!(short > 0.0 && long > short);
}

#[wasm_bindgen_test]
fn pie_renders_on_canvas() {
    let canvas = canvas();
    let mut surface = CanvasSurface::new(&canvas).unwrap();
    let spec = ChartSpec::from_json(
        r#"{"type": "pie", "data": [{"name": "A", "value": 50}, {"name": "B", "value": 50}]}"#,
    )
    .unwrap();
    assert_eq!(spec.kind, ChartKind::Pie);
    let config = ChartConfig::default();
    let style = ChartStyle::default();
    render_chart(&mut surface, &RenderParams::new(&spec, &config, &style)).unwrap();
}

#[wasm_bindgen_test]
fn svg_export_from_js_entry_point() {
    let svg = render_to_svg(SPEC).unwrap();
    assert!(svg.contains(">Bar Chart</text>"));
    assert!(render_to_svg("{not json").is_err());
}
