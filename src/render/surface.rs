//! Drawing surface trait for pluggable rendering targets.
//!
//! `DrawSurface` is the subset of the Canvas 2D API the chart drawers use.
//! Implementations exist for a browser canvas, an in-memory command
//! recorder and an SVG writer, so the same drawing code serves the browser,
//! the CLI and the tests.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Horizontal text anchor.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Canvas 2D `textAlign` keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Vertical text anchor.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Top,
    Middle,
    Bottom,
}

impl TextBaseline {
    /// Canvas 2D `textBaseline` keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alphabetic => "alphabetic",
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

/// Trait for drawing surfaces
///
/// State setters (`set_*`) affect subsequent operations, exactly as on a
/// Canvas 2D context. Paths are built with `begin_path`/`move_to`/`line_to`/
/// `arc`/`close_path` and painted with `fill` or `stroke`.
pub trait DrawSurface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn set_fill_style(&mut self, color: &str);

    fn set_stroke_style(&mut self, color: &str);

    fn set_line_width(&mut self, width: f64);

    /// CSS font shorthand, e.g. `"bold 12px sans-serif"`.
    fn set_font(&mut self, font: &str);

    fn set_text_align(&mut self, align: TextAlign);

    fn set_text_baseline(&mut self, baseline: TextBaseline);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn begin_path(&mut self);

    fn move_to(&mut self, x: f64, y: f64);

    fn line_to(&mut self, x: f64, y: f64);

    /// Clockwise arc (in screen space) from `start` to `end` radians.
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<()>;

    fn close_path(&mut self);

    fn fill(&mut self);

    fn stroke(&mut self);

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()>;

    /// Advance width of `text` in the current font.
    fn measure_text(&mut self, text: &str) -> Result<f64>;
}

/// Pixel size of a CSS font shorthand, 12 when none is given.
pub fn font_px(font: &str) -> f64 {
    font.split_whitespace()
        .find_map(|token| token.strip_suffix("px")?.parse::<f64>().ok())
        .unwrap_or(12.0)
}

/// Approximate advance width of `text` for surfaces without font metrics.
///
/// Uses an average glyph width of 0.6em, which is close for the sans-serif
/// faces the charts are drawn with.
pub fn approx_text_width(font: &str, text: &str) -> f64 {
    font_px(font) * 0.6 * text.chars().count() as f64
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
    fn test_font_px() {
        assert_eq!(font_px("bold 16px sans-serif"), 16.0);
        assert_eq!(font_px("10.5px Arial"), 10.5);
        assert_eq!(font_px("sans-serif"), 12.0);
    }

    #[test]
    fn test_approx_text_width() {
        assert_eq!(approx_text_width("10px sans-serif", "abcd"), 24.0);
        assert_eq!(approx_text_width("10px sans-serif", ""), 0.0);
    }
}
