//! `DashChart` - the WASM entry point for drawing a chart on a canvas.
//!
//! The chart keeps the last spec, config and style it was given and a dirty
//! flag. Setting any input marks it dirty; `render()` repaints only then.
//!
//! ```javascript
//! import init, { DashChart } from 'dashchart';
//! await init();
//! const chart = new DashChart(canvas, window.devicePixelRatio);
//! chart.setSpec({ type: 'bar', data, xKey: 'month', yKeys: ['social'] });
//! chart.render();
//! ```

use crate::error::Result;
use crate::render::{render_chart, DrawSurface, RenderParams};
use crate::types::{ChartConfig, ChartSpec, ChartStyle};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::HtmlCanvasElement;

#[cfg(target_arch = "wasm32")]
use crate::render::CanvasSurface;

/// Chart inputs plus the dirty flag, independent of any canvas.
#[derive(Debug, Clone)]
pub struct ChartState {
    spec: ChartSpec,
    config: ChartConfig,
    style: ChartStyle,
    dpr: f64,
    needs_render: bool,
}

impl Default for ChartState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ChartState {
    pub fn new(dpr: f64) -> Self {
        Self {
            spec: ChartSpec::default(),
            config: ChartConfig::default(),
            style: ChartStyle::default(),
            dpr: sanitize_dpr(dpr),
            needs_render: true,
        }
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    pub fn dpr(&self) -> f64 {
        self.dpr
    }

    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    pub fn set_spec(&mut self, spec: ChartSpec) {
        self.spec = spec;
        self.needs_render = true;
    }

    pub fn set_config(&mut self, config: ChartConfig) {
        self.config = config;
        self.needs_render = true;
    }

    pub fn set_style(&mut self, style: ChartStyle) {
        self.style = style;
        self.needs_render = true;
    }

    /// Change the logical size. A no-op resize keeps the chart clean.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.spec.width != width || self.spec.height != height {
            self.spec.width = width;
            self.spec.height = height;
            self.needs_render = true;
        }
    }

    pub fn set_dpr(&mut self, dpr: f64) {
        let dpr = sanitize_dpr(dpr);
        if (self.dpr - dpr).abs() > f64::EPSILON {
            self.dpr = dpr;
            self.needs_render = true;
        }
    }

    /// Backing-store size in device pixels.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn physical_size(&self) -> (u32, u32) {
        let scale = |logical: u32| (f64::from(logical) * self.dpr).round().max(1.0) as u32;
        (scale(self.spec.width), scale(self.spec.height))
    }

    /// Repaint `surface` if dirty. Returns whether a frame was drawn.
    pub fn render_if_needed(&mut self, surface: &mut dyn DrawSurface) -> Result<bool> {
        if !self.needs_render {
            return Ok(false);
        }
        render_chart(
            surface,
            &RenderParams::new(&self.spec, &self.config, &self.style),
        )?;
        self.needs_render = false;
        Ok(true)
    }
}

fn sanitize_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr
    } else {
        1.0
    }
}

/// A chart bound to an HTML canvas.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct DashChart {
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    state: ChartState,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl DashChart {
    /// Create a chart drawing into `canvas` at the given device pixel ratio.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, dpr: f64) -> std::result::Result<DashChart, JsValue> {
        console_error_panic_hook::set_once();

        let surface = CanvasSurface::new(&canvas)?;
        let mut chart = DashChart {
            canvas,
            surface,
            state: ChartState::new(dpr),
        };
        chart.apply_size()?;
        Ok(chart)
    }

    /// Replace the chart spec with a JS object (`{ data, type, xKey, yKeys, ... }`).
    #[wasm_bindgen(js_name = "setSpec")]
    pub fn set_spec(&mut self, spec: JsValue) -> std::result::Result<(), JsValue> {
        let spec: ChartSpec =
            serde_wasm_bindgen::from_value(spec).map_err(crate::error::DashchartError::from)?;
        self.state.set_spec(spec);
        Ok(())
    }

    /// Replace the chart spec with a JSON string.
    #[wasm_bindgen(js_name = "setSpecJson")]
    pub fn set_spec_json(&mut self, json: &str) -> std::result::Result<(), JsValue> {
        self.state.set_spec(ChartSpec::from_json(json)?);
        Ok(())
    }

    /// Replace the series config (`{ key: { label, color } }`).
    #[wasm_bindgen(js_name = "setConfig")]
    pub fn set_config(&mut self, config: JsValue) -> std::result::Result<(), JsValue> {
        let config: ChartConfig =
            serde_wasm_bindgen::from_value(config).map_err(crate::error::DashchartError::from)?;
        self.state.set_config(config);
        Ok(())
    }

    /// Replace the visual style. Missing fields take their defaults.
    #[wasm_bindgen(js_name = "setStyle")]
    pub fn set_style(&mut self, style: JsValue) -> std::result::Result<(), JsValue> {
        let style: ChartStyle =
            serde_wasm_bindgen::from_value(style).map_err(crate::error::DashchartError::from)?;
        self.state.set_style(style);
        Ok(())
    }

    /// Resize the chart (logical pixels).
    #[wasm_bindgen]
    pub fn resize(&mut self, width: u32, height: u32) {
        self.state.resize(width, height);
    }

    /// Update the device pixel ratio, e.g. after the window moves screens.
    #[wasm_bindgen(js_name = "setDevicePixelRatio")]
    pub fn set_device_pixel_ratio(&mut self, dpr: f64) {
        self.state.set_dpr(dpr);
    }

    /// Whether an input changed since the last frame.
    #[wasm_bindgen(js_name = "needsRender")]
    pub fn needs_render(&self) -> bool {
        self.state.needs_render()
    }

    /// Draw the chart if anything changed since the last frame.
    #[wasm_bindgen]
    pub fn render(&mut self) -> std::result::Result<(), JsValue> {
        if !self.state.needs_render() {
            return Ok(());
        }
        self.apply_size()?;
        let class_name = self.state.spec().class_name.clone().unwrap_or_default();
        if self.canvas.class_name() != class_name {
            self.canvas.set_class_name(&class_name);
        }
        self.state.render_if_needed(&mut self.surface)?;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
impl DashChart {
    /// Size the backing store in device pixels and the CSS box in logical
    /// pixels. Assigning canvas width resets the context, so only touch it
    /// on change.
    fn apply_size(&mut self) -> Result<()> {
        let (physical_width, physical_height) = self.state.physical_size();
        if self.canvas.width() != physical_width {
            self.canvas.set_width(physical_width);
        }
        if self.canvas.height() != physical_height {
            self.canvas.set_height(physical_height);
        }

        let spec = self.state.spec();
        let css = self.canvas.style();
        css.set_property("width", &format!("{}px", spec.width))
            .and_then(|()| css.set_property("height", &format!("{}px", spec.height)))
            .map_err(|e| {
                crate::error::DashchartError::Render(format!("canvas style update failed: {e:?}"))
            })?;

        self.surface.set_pixel_ratio(self.state.dpr())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::render::CommandRecorder;
    use crate::types::{ChartKind, DataPoint};

    #[test]
    fn test_renders_only_when_dirty() {
        let mut state = ChartState::new(1.0);
        let mut rec = CommandRecorder::new(500.0, 300.0);
        assert!(state.render_if_needed(&mut rec).unwrap());
        assert!(!state.needs_render());
        assert!(!state.render_if_needed(&mut rec).unwrap());

        state.set_spec(ChartSpec::new(ChartKind::Pie).with_points(vec![DataPoint::new()
            .with("name", "A")
            .with("value", 1)]));
        assert!(state.needs_render());
        assert!(state.render_if_needed(&mut rec).unwrap());
        assert!(rec.texts().iter().any(|t| t.text == "Pie Chart"));
    }

    #[test]
    fn test_resize_marks_dirty_only_on_change() {
        let mut state = ChartState::new(1.0);
        let mut rec = CommandRecorder::new(500.0, 300.0);
        state.render_if_needed(&mut rec).unwrap();

        state.resize(500, 300);
        assert!(!state.needs_render());
        state.resize(640, 360);
        assert!(state.needs_render());
        assert_eq!((state.spec().width, state.spec().height), (640, 360));
    }

    #[test]
    fn test_physical_size_scales_by_dpr() {
        let mut state = ChartState::new(2.0);
        assert_eq!(state.physical_size(), (1000, 600));
        state.set_dpr(1.5);
        assert_eq!(state.physical_size(), (750, 450));
        state.set_dpr(f64::NAN);
        assert_eq!(state.dpr(), 1.0);
    }

    #[test]
    fn test_config_and_style_mark_dirty() {
        let mut state = ChartState::default();
        let mut rec = CommandRecorder::new(500.0, 300.0);
        state.render_if_needed(&mut rec).unwrap();
        state.set_config(ChartConfig::new().with_series("value", "Value", "#000000"));
        assert!(state.needs_render());
        state.render_if_needed(&mut rec).unwrap();
        state.set_style(ChartStyle::default());
        assert!(state.needs_render());
    }
}
