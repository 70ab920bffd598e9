//! SVG drawing surface.
//!
//! Translates canvas-style drawing operations into SVG elements, so the CLI
//! and non-browser callers can export a chart as a standalone document.
//! Text widths use the same approximation as the command recorder.

use std::f64::consts::{PI, TAU};
use std::fmt::Write as _;

use crate::error::Result;

use super::colors::parse_color_rgba;
use super::surface::{approx_text_width, DrawSurface, TextAlign, TextBaseline};

/// Drawing surface that accumulates SVG elements.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    fill: String,
    stroke: String,
    line_width: f64,
    font: String,
    align: TextAlign,
    baseline: TextBaseline,
    path: String,
    has_current_point: bool,
    elements: Vec<String>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            fill: "#000000".to_string(),
            stroke: "#000000".to_string(),
            line_width: 1.0,
            font: "10px sans-serif".to_string(),
            align: TextAlign::default(),
            baseline: TextBaseline::default(),
            path: String::new(),
            has_current_point: false,
            elements: Vec::new(),
        }
    }

    /// Finish the document.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = num(self.width),
            h = num(self.height)
        );
        out.push('\n');
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }

    /// Number of elements drawn since the last full clear.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn paint_attrs(attr: &str, color: &str) -> String {
        match parse_color_rgba(color) {
            Some((r, g, b, a)) if a < 1.0 => format!(
                r##"{attr}="#{r:02X}{g:02X}{b:02X}" {attr}-opacity="{}""##,
                num(a)
            ),
            Some((r, g, b, _)) => format!(r##"{attr}="#{r:02X}{g:02X}{b:02X}""##),
            None => format!(r#"{attr}="{}""#, escape(color)),
        }
    }

    fn path_cmd(&mut self, cmd: char, x: f64, y: f64) {
        if !self.path.is_empty() {
            self.path.push(' ');
        }
        let _ = write!(self.path, "{cmd}{} {}", num(x), num(y));
        self.has_current_point = true;
    }

    fn arc_segment(&mut self, radius: f64, large: bool, sweep_positive: bool, x: f64, y: f64) {
        let _ = write!(
            self.path,
            " A{r} {r} 0 {} {} {} {}",
            u8::from(large),
            u8::from(sweep_positive),
            num(x),
            num(y),
            r = num(radius)
        );
    }
}

/// Format a coordinate with at most two decimals and no trailing zeros.
fn num(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let mut s = format!("{value:.2}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl DrawSurface for SvgSurface {
    /// A full clear drops every element. SVG has no way to punch a hole in
    /// earlier elements, so partial clears are ignored.
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        if x <= 0.0 && y <= 0.0 && x + w >= self.width && y + h >= self.height {
            self.elements.clear();
        }
    }

    fn set_fill_style(&mut self, color: &str) {
        self.fill = color.to_string();
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.stroke = color.to_string();
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.baseline = baseline;
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        // Canvas accepts negative extents; SVG does not
        let (x, w) = if w < 0.0 { (x + w, -w) } else { (x, w) };
        let (y, h) = if h < 0.0 { (y + h, -h) } else { (y, h) };
        self.elements.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" {}/>"#,
            num(x),
            num(y),
            num(w),
            num(h),
            Self::paint_attrs("fill", &self.fill)
        ));
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.has_current_point = false;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path_cmd('M', x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let cmd = if self.has_current_point { 'L' } else { 'M' };
        self.path_cmd(cmd, x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<()> {
        let point_at = |angle: f64| (x + radius * angle.cos(), y + radius * angle.sin());
        let (sx, sy) = point_at(start);
        self.line_to(sx, sy);

        let sweep = end - start;
        if radius <= 0.0 || sweep == 0.0 {
            return Ok(());
        }
        let positive = sweep > 0.0;
        if sweep.abs() >= TAU - 1e-9 {
            // A single SVG arc cannot start and end at the same point
            let (mx, my) = point_at(start + sweep / 2.0);
            let (ex, ey) = point_at(start + sweep.signum() * TAU);
            self.arc_segment(radius, false, positive, mx, my);
            self.arc_segment(radius, false, positive, ex, ey);
        } else {
            let (ex, ey) = point_at(end);
            self.arc_segment(radius, sweep.abs() > PI, positive, ex, ey);
        }
        Ok(())
    }

    fn close_path(&mut self) {
        if !self.path.is_empty() {
            self.path.push_str(" Z");
        }
    }

    fn fill(&mut self) {
        if self.path.is_empty() {
            return;
        }
        self.elements.push(format!(
            r#"<path d="{}" {}/>"#,
            self.path,
            Self::paint_attrs("fill", &self.fill)
        ));
    }

    fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }
        self.elements.push(format!(
            r#"<path d="{}" fill="none" {} stroke-width="{}"/>"#,
            self.path,
            Self::paint_attrs("stroke", &self.stroke),
            num(self.line_width)
        ));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        let anchor = match self.align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        };
        let baseline = match self.baseline {
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Top => "hanging",
            TextBaseline::Middle => "middle",
            TextBaseline::Bottom => "text-after-edge",
        };
        self.elements.push(format!(
            r#"<text x="{}" y="{}" {} text-anchor="{anchor}" dominant-baseline="{baseline}" style="font: {}">{}</text>"#,
            num(x),
            num(y),
            Self::paint_attrs("fill", &self.fill),
            escape(&self.font),
            escape(text)
        ));
        Ok(())
    }

    fn measure_text(&mut self, text: &str) -> Result<f64> {
        Ok(approx_text_width(&self.font, text))
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

    #[test]
    fn test_num_trims() {
        assert_eq!(num(60.0), "60");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(f64::NAN), "0");
    }

    #[test]
    fn test_rect_and_alpha_fill() {
        let mut svg = SvgSurface::new(100.0, 50.0);
        svg.set_fill_style("#3B82F633");
        svg.fill_rect(10.0, 40.0, 5.0, -20.0);
        let doc = svg.to_svg();
        assert!(doc.contains(r##"<rect x="10" y="20" width="5" height="20" fill="#3B82F6" fill-opacity="0.2"/>"##));
    }

    #[test]
    fn test_path_commands() {
        let mut svg = SvgSurface::new(100.0, 100.0);
        svg.set_stroke_style("#EF4444");
        svg.set_line_width(2.0);
        svg.begin_path();
        svg.move_to(0.0, 0.0);
        svg.line_to(10.0, 20.0);
        svg.stroke();
        assert!(svg
            .to_svg()
            .contains(r##"<path d="M0 0 L10 20" fill="none" stroke="#EF4444" stroke-width="2"/>"##));
    }

    #[test]
    fn test_half_arc_sector() {
        let mut svg = SvgSurface::new(100.0, 100.0);
        svg.begin_path();
        svg.move_to(50.0, 50.0);
        svg.arc(50.0, 50.0, 10.0, 0.0, PI).unwrap();
        svg.close_path();
        svg.fill();
        assert!(svg.to_svg().contains(r#"d="M50 50 L60 50 A10 10 0 0 1 40 50 Z""#));
    }

    #[test]
    fn test_full_circle_splits_arc() {
        let mut svg = SvgSurface::new(100.0, 100.0);
        svg.begin_path();
        svg.arc(50.0, 50.0, 10.0, 0.0, TAU).unwrap();
        svg.fill();
        assert!(svg
            .to_svg()
            .contains(r#"d="M60 50 A10 10 0 0 1 40 50 A10 10 0 0 1 60 50""#));
    }

    #[test]
    fn test_text_is_escaped_and_anchored() {
        let mut svg = SvgSurface::new(100.0, 100.0);
        svg.set_text_align(TextAlign::Center);
        svg.set_text_baseline(TextBaseline::Middle);
        svg.fill_text("<$30k & up", 50.0, 10.0).unwrap();
        let doc = svg.to_svg();
        assert!(doc.contains("&lt;$30k &amp; up"));
        assert!(doc.contains(r#"text-anchor="middle" dominant-baseline="middle""#));
    }

    #[test]
    fn test_full_clear_drops_elements() {
        let mut svg = SvgSurface::new(100.0, 100.0);
        svg.fill_rect(0.0, 0.0, 1.0, 1.0);
        svg.clear_rect(0.0, 0.0, 100.0, 100.0);
        assert_eq!(svg.element_count(), 0);
    }
}
