//! Legend strip shared by the axis and pie drawers.

use crate::error::Result;
use crate::types::ChartStyle;

use super::colors::CssColor;
use super::surface::{DrawSurface, TextAlign, TextBaseline};

/// One legend item.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: CssColor,
}

impl LegendEntry {
    pub fn new(label: impl Into<String>, color: impl Into<CssColor>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
        }
    }
}

/// How the x cursor advances between entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegendLayout {
    /// Every entry takes the same column width.
    Columns(f64),
    /// Each entry takes its measured width plus `gap`.
    Measured { gap: f64 },
}

/// Draw `entries` left to right starting at `(x, y)`, where `y` is the
/// vertical center of the strip.
///
/// Returns the x cursor after the last entry.
pub fn render_legend(
    surface: &mut dyn DrawSurface,
    entries: &[LegendEntry],
    x: f64,
    y: f64,
    layout: LegendLayout,
    style: &ChartStyle,
) -> Result<f64> {
    let swatch = style.legend_swatch_size;
    let text_gap = swatch / 2.0;

    surface.set_font(&style.legend_font);
    surface.set_text_align(TextAlign::Left);
    surface.set_text_baseline(TextBaseline::Middle);

    let mut cursor = x;
    for entry in entries {
        surface.set_fill_style(&entry.color);
        surface.fill_rect(cursor, y - swatch / 2.0, swatch, swatch);

        surface.set_fill_style(&style.text_color);
        surface.fill_text(&entry.label, cursor + swatch + text_gap, y)?;

        cursor += match layout {
            LegendLayout::Columns(width) => width,
            LegendLayout::Measured { gap } => {
                swatch + text_gap + surface.measure_text(&entry.label)? + gap
            }
        };
    }
    Ok(cursor)
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
    use crate::render::recorder::CommandRecorder;

    fn entries() -> Vec<LegendEntry> {
        vec![
            LegendEntry::new("Social Media", "#3B82F6"),
            LegendEntry::new("News", "#EF4444"),
        ]
    }

    #[test]
    fn test_fixed_columns() {
        let style = ChartStyle::default();
        let mut rec = CommandRecorder::new(500.0, 300.0);
        let end = render_legend(&mut rec, &entries(), 60.0, 280.0, LegendLayout::Columns(100.0), &style)
            .unwrap();
        assert_eq!(end, 260.0);

        let rects = rec.rects();
        assert_eq!(rects.len(), 2);
        assert_eq!((rects[0].x, rects[1].x), (60.0, 160.0));
        assert_eq!(rects[0].y, 274.0);
        assert_eq!(rects[1].color, "#EF4444");

        let texts = rec.texts();
        assert_eq!(texts[0].text, "Social Media");
        assert_eq!(texts[0].x, 78.0);
        assert_eq!(texts[0].align, TextAlign::Left);
        assert_eq!(texts[0].color, style.text_color);
    }

    #[test]
    fn test_measured_entries_do_not_overlap() {
        let style = ChartStyle::default();
        let mut rec = CommandRecorder::new(500.0, 300.0);
        render_legend(
            &mut rec,
            &entries(),
            10.0,
            270.0,
            LegendLayout::Measured { gap: 20.0 },
            &style,
        )
        .unwrap();

        let rects = rec.rects();
        let first_text_end = 10.0 + 12.0 + 6.0 + 12.0 * 0.6 * "Social Media".len() as f64;
        assert!(rects[1].x >= first_text_end);
        assert!((rects[1].x - (first_text_end + 20.0)).abs() < 1e-9);
    }
}
