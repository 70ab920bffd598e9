//! Full-frame chart rendering: clear, background, title, then the drawer
//! for the chart kind.

use crate::error::Result;
use crate::types::{ChartConfig, ChartKind, ChartSpec, ChartStyle};

use super::axis::render_axis_chart;
use super::pie::render_pie_chart;
use super::surface::{DrawSurface, TextAlign, TextBaseline};

/// Inputs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderParams<'a> {
    pub spec: &'a ChartSpec,
    pub config: &'a ChartConfig,
    pub style: &'a ChartStyle,
}

impl<'a> RenderParams<'a> {
    pub fn new(spec: &'a ChartSpec, config: &'a ChartConfig, style: &'a ChartStyle) -> Self {
        Self {
            spec,
            config,
            style,
        }
    }
}

/// Repaint the whole surface from `params`.
///
/// The output depends only on `params`; rendering the same params twice
/// produces the same frame.
pub fn render_chart(surface: &mut dyn DrawSurface, params: &RenderParams<'_>) -> Result<()> {
    let RenderParams {
        spec,
        config,
        style,
    } = *params;
    let width = f64::from(spec.width);
    let height = f64::from(spec.height);

    tracing::debug!(
        kind = ?spec.kind,
        points = spec.points.len(),
        series = spec.series_keys.len(),
        width,
        height,
        "rendering chart"
    );

    surface.clear_rect(0.0, 0.0, width, height);
    surface.set_fill_style(&style.background_color);
    surface.fill_rect(0.0, 0.0, width, height);

    surface.set_font(&style.title_font);
    surface.set_fill_style(&style.text_color);
    surface.set_text_align(TextAlign::Center);
    surface.set_text_baseline(TextBaseline::Alphabetic);
    surface.fill_text(spec.kind.title(), width / 2.0, style.title_y)?;

    if spec.points.is_empty() {
        return Ok(());
    }

    match spec.kind {
        ChartKind::Line | ChartKind::Bar | ChartKind::Area => {
            render_axis_chart(surface, spec, config, style)
        }
        ChartKind::Pie => render_pie_chart(surface, spec, config, style),
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
    use crate::render::recorder::{CommandRecorder, DrawCommand};

    #[test]
    fn test_frame_starts_with_clear_and_background() {
        let spec = ChartSpec::new(ChartKind::Bar);
        let config = ChartConfig::default();
        let style = ChartStyle::default();
        let mut rec = CommandRecorder::new(500.0, 300.0);
        render_chart(&mut rec, &RenderParams::new(&spec, &config, &style)).unwrap();

        assert!(matches!(rec.commands()[0], DrawCommand::ClearRect { .. }));
        let rects = rec.rects();
        assert_eq!(rects[0].w, 500.0);
        assert_eq!(rects[0].h, 300.0);
        assert_eq!(rects[0].color, "#FFFFFF");
        let texts = rec.texts();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].text, "Bar Chart");
        assert_eq!(texts[0].x, 250.0);
    }

    #[test]
    fn test_surface_is_repainted_not_appended() {
        let spec = ChartSpec::new(ChartKind::Line);
        let config = ChartConfig::default();
        let style = ChartStyle::default();
        let params = RenderParams::new(&spec, &config, &style);
        let mut rec = CommandRecorder::new(500.0, 300.0);
        render_chart(&mut rec, &params).unwrap();
        let first = rec.commands().to_vec();
        render_chart(&mut rec, &params).unwrap();
        assert_eq!(rec.commands(), first.as_slice());
    }
}
