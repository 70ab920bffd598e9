//! Pie charts.
//!
//! Slices follow input order starting at angle 0 and advance clockwise in
//! screen space. Only the first series key is plotted.

use std::f64::consts::TAU;

use crate::error::Result;
use crate::numfmt::format_percent;
use crate::types::{ChartConfig, ChartSpec, ChartStyle, DataPoint};

use super::colors::{palette_color, parse_color, CssColor};
use super::legend::{render_legend, LegendEntry, LegendLayout};
use super::surface::{DrawSurface, TextAlign, TextBaseline};

/// One sector of a pie.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: CssColor,
}

impl PieSlice {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.sweep() / 2.0
    }
}

/// Pixel-space layout of a pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PieLayout {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    /// Sum of the plotted values (negatives count as 0)
    pub total: f64,
    pub slices: Vec<PieSlice>,
}

impl PieLayout {
    pub fn compute(spec: &ChartSpec, config: &ChartConfig, style: &ChartStyle) -> Self {
        let center_x = f64::from(spec.width) / 2.0;
        let center_y = f64::from(spec.height) / 2.0;
        let radius = (center_x.min(center_y) - style.pie_margin).max(0.0);

        let key = spec.plotted_keys().first();
        let values: Vec<f64> = spec
            .points
            .iter()
            .map(|p| key.map_or(0.0, |k| p.number(k)).max(0.0))
            .collect();
        let total: f64 = values.iter().sum();

        let mut start_angle = 0.0;
        let slices = spec
            .points
            .iter()
            .zip(values)
            .enumerate()
            .map(|(idx, (point, value))| {
                let sweep = if total > 0.0 { value / total * TAU } else { 0.0 };
                let label = point.label(&spec.category_key);
                let color = slice_color(point, &spec.color_key, config, &label, idx);
                let slice = PieSlice {
                    label,
                    value,
                    start_angle,
                    end_angle: start_angle + sweep,
                    color,
                };
                start_angle += sweep;
                slice
            })
            .collect();

        Self {
            center_x,
            center_y,
            radius,
            total,
            slices,
        }
    }

    /// Where the label of `slice` is centered: on the mid-angle, at
    /// `factor` of the radius.
    pub fn label_position(&self, slice: &PieSlice, factor: f64) -> (f64, f64) {
        let angle = slice.mid_angle();
        let distance = self.radius * factor;
        (
            self.center_x + angle.cos() * distance,
            self.center_y + angle.sin() * distance,
        )
    }
}

/// Point color field, then configured color for the label, then palette.
fn slice_color(
    point: &DataPoint,
    color_key: &str,
    config: &ChartConfig,
    label: &str,
    idx: usize,
) -> CssColor {
    point
        .get(color_key)
        .and_then(|v| v.as_text())
        .and_then(parse_color)
        .or_else(|| config.color_for(label).and_then(parse_color))
        .unwrap_or_else(|| palette_color(idx).to_string())
}

/// Draw sectors, in-slice labels and the percentage legend.
pub(crate) fn render_pie_chart(
    surface: &mut dyn DrawSurface,
    spec: &ChartSpec,
    config: &ChartConfig,
    style: &ChartStyle,
) -> Result<()> {
    let layout = PieLayout::compute(spec, config, style);

    if layout.total > 0.0 {
        render_slices(surface, &layout)?;
        render_slice_labels(surface, &layout, style)?;
    } else {
        tracing::debug!(points = spec.points.len(), "pie total is not positive, drawing placeholder");
        surface.set_font(&style.label_font);
        surface.set_fill_style(&style.text_color);
        surface.set_text_align(TextAlign::Center);
        surface.set_text_baseline(TextBaseline::Middle);
        surface.fill_text(&style.empty_message, layout.center_x, layout.center_y)?;
    }

    let entries: Vec<LegendEntry> = layout
        .slices
        .iter()
        .map(|slice| {
            let label = format!(
                "{}: {}",
                config.label_for(&slice.label),
                format_percent(slice.value, layout.total)
            );
            LegendEntry::new(label, slice.color.clone())
        })
        .collect();
    render_legend(
        surface,
        &entries,
        style.padding.left,
        f64::from(spec.height) - style.pie_legend_offset,
        LegendLayout::Measured {
            gap: style.legend_gap,
        },
        style,
    )?;
    Ok(())
}

fn render_slices(surface: &mut dyn DrawSurface, layout: &PieLayout) -> Result<()> {
    for slice in layout.slices.iter().filter(|s| s.sweep() > 0.0) {
        surface.begin_path();
        surface.move_to(layout.center_x, layout.center_y);
        surface.arc(
            layout.center_x,
            layout.center_y,
            layout.radius,
            slice.start_angle,
            slice.end_angle,
        )?;
        surface.close_path();
        surface.set_fill_style(&slice.color);
        surface.fill();
    }
    Ok(())
}

fn render_slice_labels(
    surface: &mut dyn DrawSurface,
    layout: &PieLayout,
    style: &ChartStyle,
) -> Result<()> {
    surface.set_font(&style.slice_label_font);
    surface.set_fill_style(&style.slice_label_color);
    surface.set_text_align(TextAlign::Center);
    surface.set_text_baseline(TextBaseline::Middle);

    for slice in layout.slices.iter().filter(|s| s.sweep() > 0.0) {
        let (x, y) = layout.label_position(slice, style.slice_label_radius);
        surface.fill_text(&slice.label, x, y)?;
    }
    Ok(())
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
    use crate::types::ChartKind;

    fn validation_results() -> ChartSpec {
        ChartSpec::new(ChartKind::Pie).with_points(vec![
            DataPoint::new()
                .with("name", "Validated")
                .with("value", 73.8)
                .with("color", "#4ade80"),
            DataPoint::new()
                .with("name", "Pending")
                .with("value", 22.7)
                .with("color", "#facc15"),
            DataPoint::new()
                .with("name", "Flagged")
                .with("value", 3.5)
                .with("color", "#f87171"),
        ])
    }

    #[test]
    fn test_layout_geometry() {
        let layout =
            PieLayout::compute(&validation_results(), &ChartConfig::default(), &ChartStyle::default());
        assert_eq!((layout.center_x, layout.center_y), (250.0, 150.0));
        assert_eq!(layout.radius, 90.0);
        assert!((layout.total - 100.0).abs() < 1e-9);
        assert_eq!(layout.slices[0].start_angle, 0.0);
        assert_eq!(layout.slices[1].start_angle, layout.slices[0].end_angle);
        assert!((layout.slices[2].end_angle - TAU).abs() < 1e-9);
    }

    #[test]
    fn test_point_color_wins() {
        let config = ChartConfig::new().with_series("Validated", "Validated", "#000000");
        let layout = PieLayout::compute(&validation_results(), &config, &ChartStyle::default());
        assert_eq!(layout.slices[0].color, "#4ADE80");
    }

    #[test]
    fn test_config_then_palette_colors() {
        let spec = ChartSpec::new(ChartKind::Pie).with_points(vec![
            DataPoint::new().with("name", "Male").with("value", 42),
            DataPoint::new().with("name", "Female").with("value", 57),
        ]);
        let config = ChartConfig::new().with_series("Male", "Male", "#60a5fa");
        let layout = PieLayout::compute(&spec, &config, &ChartStyle::default());
        assert_eq!(layout.slices[0].color, "#60A5FA");
        assert_eq!(layout.slices[1].color, palette_color(1));
    }

    #[test]
    fn test_label_at_seventy_percent_radius() {
        let layout =
            PieLayout::compute(&validation_results(), &ChartConfig::default(), &ChartStyle::default());
        let slice = &layout.slices[1];
        let (x, y) = layout.label_position(slice, 0.7);
        let dx = x - layout.center_x;
        let dy = y - layout.center_y;
        assert!(((dx * dx + dy * dy).sqrt() - 63.0).abs() < 1e-9);
        assert!((dy.atan2(dx).rem_euclid(TAU) - slice.mid_angle()).abs() < 1e-9);
    }

    #[test]
    fn test_zero_total_draws_placeholder() {
        let spec = ChartSpec::new(ChartKind::Pie).with_points(vec![
            DataPoint::new().with("name", "A").with("value", 0),
            DataPoint::new().with("name", "B").with("value", -3),
        ]);
        let mut rec = CommandRecorder::new(500.0, 300.0);
        render_pie_chart(&mut rec, &spec, &ChartConfig::default(), &ChartStyle::default())
            .unwrap();

        assert!(rec.paths().is_empty());
        let texts = rec.texts();
        assert!(texts.iter().any(|t| t.text == "No data" && t.x == 250.0 && t.y == 150.0));
        assert!(texts.iter().any(|t| t.text == "A: 0.0%"));
        assert!(texts.iter().any(|t| t.text == "B: 0.0%"));
        for text in &texts {
            assert!(text.x.is_finite() && text.y.is_finite());
        }
    }

    #[test]
    fn test_zero_value_slice_is_skipped() {
        let spec = ChartSpec::new(ChartKind::Pie).with_points(vec![
            DataPoint::new().with("name", "A").with("value", 10),
            DataPoint::new().with("name", "B").with("value", 0),
        ]);
        let mut rec = CommandRecorder::new(500.0, 300.0);
        render_pie_chart(&mut rec, &spec, &ChartConfig::default(), &ChartStyle::default())
            .unwrap();
        assert_eq!(rec.paths().len(), 1);
        let slice_labels: Vec<_> = rec
            .texts()
            .into_iter()
            .filter(|t| t.align == TextAlign::Center)
            .collect();
        assert_eq!(slice_labels.len(), 1);
        assert_eq!(slice_labels[0].color, "#FFFFFF");
        assert!(slice_labels[0].font.starts_with("bold"));
    }
}
