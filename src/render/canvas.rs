//! Canvas 2D drawing surface.
//!
//! Forwards every operation to an HTML canvas via web-sys. The context is
//! scaled by the device pixel ratio so drawing code works in logical pixels.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::{DashchartError, Result};

use super::surface::{DrawSurface, TextAlign, TextBaseline};

fn js_error(context: &str, err: &JsValue) -> DashchartError {
    let detail = err.as_string().unwrap_or_else(|| format!("{err:?}"));
    DashchartError::Render(format!("{context}: {detail}"))
}

/// Drawing surface backed by a `CanvasRenderingContext2d`.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context of `canvas`.
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| js_error("getContext('2d') failed", &e))?
            .ok_or_else(|| DashchartError::Render("canvas has no 2d context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| DashchartError::Render("2d context has unexpected type".to_string()))?;

        Ok(Self { ctx })
    }

    /// Map one logical pixel to `dpr` device pixels.
    ///
    /// The caller sizes the canvas backing store first; resizing a canvas
    /// resets its transform.
    pub fn set_pixel_ratio(&mut self, dpr: f64) -> Result<()> {
        self.ctx
            .set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
            .map_err(|e| js_error("setTransform failed", &e))
    }
}

impl DrawSurface for CanvasSurface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(align.as_str());
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.ctx.set_text_baseline(baseline.as_str());
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.fill_rect(x, y, w, h);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<()> {
        self.ctx
            .arc(x, y, radius, start, end)
            .map_err(|e| js_error("arc failed", &e))
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        self.ctx
            .fill_text(text, x, y)
            .map_err(|e| js_error("fillText failed", &e))
    }

    fn measure_text(&mut self, text: &str) -> Result<f64> {
        self.ctx
            .measure_text(text)
            .map(|m| m.width())
            .map_err(|e| js_error("measureText failed", &e))
    }
}
