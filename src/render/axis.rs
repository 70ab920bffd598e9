//! Line, bar and area charts.

use crate::error::Result;
use crate::numfmt::format_axis_value;
use crate::types::{ChartConfig, ChartKind, ChartSpec, ChartStyle};

use super::colors::{series_color, with_alpha};
use super::geometry::Geometry;
use super::legend::{render_legend, LegendEntry, LegendLayout};
use super::surface::{DrawSurface, TextAlign, TextBaseline};

/// Draw gridlines, axes, category labels, series marks and the legend.
pub(crate) fn render_axis_chart(
    surface: &mut dyn DrawSurface,
    spec: &ChartSpec,
    config: &ChartConfig,
    style: &ChartStyle,
) -> Result<()> {
    let keys = spec.plotted_keys();
    let geometry = Geometry::compute(
        &spec.points,
        keys,
        f64::from(spec.width),
        f64::from(spec.height),
        style.padding,
        style.headroom,
    );

    render_gridlines(surface, &geometry, style)?;
    render_axis_lines(surface, &geometry, style);
    render_category_labels(surface, spec, &geometry, style)?;

    match spec.kind {
        ChartKind::Bar => render_bars(surface, spec, config, &geometry),
        ChartKind::Line | ChartKind::Area => render_lines(surface, spec, config, &geometry, style),
        ChartKind::Pie => {}
    }

    let entries: Vec<LegendEntry> = keys
        .iter()
        .enumerate()
        .map(|(idx, key)| LegendEntry::new(config.label_for(key), series_color(config, key, idx)))
        .collect();
    render_legend(
        surface,
        &entries,
        geometry.padding.left,
        geometry.height - style.legend_offset,
        LegendLayout::Columns(style.legend_column_width),
        style,
    )?;
    Ok(())
}

/// Horizontal gridlines with their y-axis tick labels.
///
/// Lines are evenly spaced over the plot height even when every value is
/// zero; only the tick labels depend on `max_value`.
fn render_gridlines(
    surface: &mut dyn DrawSurface,
    geometry: &Geometry,
    style: &ChartStyle,
) -> Result<()> {
    let intervals = style.gridline_intervals.max(1);
    let left = geometry.padding.left;
    let right = left + geometry.chart_width;

    surface.set_stroke_style(&style.grid_color);
    surface.set_line_width(1.0);
    surface.set_font(&style.label_font);
    surface.set_fill_style(&style.text_color);
    surface.set_text_align(TextAlign::Right);
    surface.set_text_baseline(TextBaseline::Middle);

    for (i, value) in geometry.gridline_values(intervals).into_iter().enumerate() {
        let y = geometry.baseline()
            - geometry.chart_height * i as f64 / f64::from(intervals);

        surface.begin_path();
        surface.move_to(left, y);
        surface.line_to(right, y);
        surface.stroke();

        surface.fill_text(&format_axis_value(value, geometry.max_value), left - 10.0, y)?;
    }
    Ok(())
}

/// L-shaped y and x axis lines.
fn render_axis_lines(surface: &mut dyn DrawSurface, geometry: &Geometry, style: &ChartStyle) {
    let left = geometry.padding.left;
    let baseline = geometry.baseline();

    surface.set_stroke_style(&style.axis_color);
    surface.set_line_width(1.0);
    surface.begin_path();
    surface.move_to(left, geometry.padding.top);
    surface.line_to(left, baseline);
    surface.line_to(left + geometry.chart_width, baseline);
    surface.stroke();
}

fn render_category_labels(
    surface: &mut dyn DrawSurface,
    spec: &ChartSpec,
    geometry: &Geometry,
    style: &ChartStyle,
) -> Result<()> {
    surface.set_font(&style.label_font);
    surface.set_fill_style(&style.text_color);
    surface.set_text_align(TextAlign::Center);
    surface.set_text_baseline(TextBaseline::Top);

    let label_y = geometry.baseline() + 10.0;
    for (idx, label) in spec.category_labels().iter().enumerate() {
        surface.fill_text(label, geometry.x(idx), label_y)?;
    }
    Ok(())
}

/// One polyline per series; area charts fill under the line first.
fn render_lines(
    surface: &mut dyn DrawSurface,
    spec: &ChartSpec,
    config: &ChartConfig,
    geometry: &Geometry,
    style: &ChartStyle,
) {
    let baseline = geometry.baseline();

    for (series_idx, key) in spec.plotted_keys().iter().enumerate() {
        let color = series_color(config, key, series_idx);
        let vertices: Vec<(f64, f64)> = spec
            .points
            .iter()
            .enumerate()
            .map(|(idx, point)| (geometry.x(idx), geometry.y(point.number(key))))
            .collect();
        let (Some(&(first_x, _)), Some(&(last_x, _))) = (vertices.first(), vertices.last()) else {
            continue;
        };

        if spec.kind == ChartKind::Area {
            surface.begin_path();
            surface.move_to(first_x, baseline);
            for &(x, y) in &vertices {
                surface.line_to(x, y);
            }
            surface.line_to(last_x, baseline);
            surface.close_path();
            surface.set_fill_style(&with_alpha(&color, &style.area_alpha));
            surface.fill();
        }

        surface.begin_path();
        for (idx, &(x, y)) in vertices.iter().enumerate() {
            if idx == 0 {
                surface.move_to(x, y);
            } else {
                surface.line_to(x, y);
            }
        }
        surface.set_stroke_style(&color);
        surface.set_line_width(style.line_width);
        surface.stroke();
    }
}

/// Clustered bars, one per series in every category slot.
fn render_bars(
    surface: &mut dyn DrawSurface,
    spec: &ChartSpec,
    config: &ChartConfig,
    geometry: &Geometry,
) {
    let keys = spec.plotted_keys();
    let series_count = keys.len();
    let bar_width = geometry.bar_width(series_count);
    let baseline = geometry.baseline();

    for (series_idx, key) in keys.iter().enumerate() {
        surface.set_fill_style(&series_color(config, key, series_idx));
        for (idx, point) in spec.points.iter().enumerate() {
            // Negative values have no extent above the baseline
            let bar_height = geometry.value_height(point.number(key)).max(0.0);
            surface.fill_rect(
                geometry.bar_x(idx, series_idx, series_count),
                baseline - bar_height,
                bar_width,
                bar_height,
            );
        }
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
    use crate::render::recorder::CommandRecorder;
    use crate::types::DataPoint;

    fn monthly(kind: ChartKind) -> ChartSpec {
        ChartSpec::new(kind)
            .with_category_key("month")
            .with_series_keys(["rate"])
            .with_points(vec![
                DataPoint::new().with("month", "Jun").with("rate", 8.2),
                DataPoint::new().with("month", "Jul").with("rate", 9.1),
                DataPoint::new().with("month", "Aug").with("rate", 10.3),
            ])
    }

    fn draw(spec: &ChartSpec) -> CommandRecorder {
        let mut rec = CommandRecorder::new(f64::from(spec.width), f64::from(spec.height));
        render_axis_chart(&mut rec, spec, &ChartConfig::default(), &ChartStyle::default()).unwrap();
        rec
    }

    #[test]
    fn test_six_gridlines_with_tick_labels() {
        let rec = draw(&monthly(ChartKind::Line));
        let ticks: Vec<_> = rec
            .texts()
            .into_iter()
            .filter(|t| t.align == TextAlign::Right)
            .collect();
        assert_eq!(ticks.len(), 6);
        assert_eq!(ticks[0].text, "0");
        // max 10.3 * 1.1 = 11.33
        assert_eq!(ticks[5].text, "11");
        assert_eq!(ticks[0].y, 240.0);
        assert_eq!(ticks[5].y, 40.0);
    }

    #[test]
    fn test_category_labels_under_points() {
        let spec = monthly(ChartKind::Line);
        let rec = draw(&spec);
        let labels: Vec<_> = rec
            .texts()
            .into_iter()
            .filter(|t| t.align == TextAlign::Center)
            .collect();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[1].text, "Jul");
        assert_eq!(labels[1].x, 270.0);
        assert_eq!(labels[1].y, 250.0);
    }

    #[test]
    fn test_line_stroke_width_and_color() {
        let rec = draw(&monthly(ChartKind::Line));
        let series: Vec<_> = rec
            .paths()
            .into_iter()
            .filter(|p| matches!(&p.stroke, Some((color, _)) if color == "#3B82F6"))
            .collect();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].points.len(), 3);
        let (_, width) = series[0].stroke.clone().unwrap();
        assert_eq!(width, 2.0);
        assert!(series[0].fill.is_none());
    }

    #[test]
    fn test_area_closes_to_baseline_with_alpha() {
        let rec = draw(&monthly(ChartKind::Area));
        let fills: Vec<_> = rec.paths().into_iter().filter(|p| p.fill.is_some()).collect();
        assert_eq!(fills.len(), 1);
        let area = &fills[0];
        assert!(area.closed);
        assert_eq!(area.fill.as_deref(), Some("#3B82F633"));
        assert_eq!(area.points.first(), Some(&(60.0, 240.0)));
        assert_eq!(area.points.last(), Some(&(480.0, 240.0)));
    }

    #[test]
    fn test_bars_anchor_at_baseline() {
        let rec = draw(&monthly(ChartKind::Bar));
        let bars: Vec<_> = rec
            .rects()
            .into_iter()
            .filter(|r| r.color == "#3B82F6" && r.y < 240.0)
            .collect();
        assert_eq!(bars.len(), 3);
        for bar in &bars {
            assert!((bar.y + bar.h - 240.0).abs() < 1e-9);
            assert_eq!(bar.w, 105.0);
        }
        let lefts: Vec<_> = bars.iter().map(|b| b.x).collect();
        assert_eq!(lefts, vec![60.0, 217.5, 375.0]);
    }

    #[test]
    fn test_negative_bar_has_no_height() {
        let spec = ChartSpec::new(ChartKind::Bar).with_points(vec![
            DataPoint::new().with("name", "A").with("value", -4),
            DataPoint::new().with("name", "B").with("value", 4),
        ]);
        let rec = draw(&spec);
        let bar_heights: Vec<_> = rec
            .rects()
            .into_iter()
            .filter(|r| r.color == "#3B82F6" && r.w > 12.0)
            .map(|r| r.h)
            .collect();
        assert_eq!(bar_heights.len(), 2);
        assert_eq!(bar_heights[0], 0.0);
        assert!(bar_heights[1] > 0.0);
    }

    #[test]
    fn test_config_labels_legend() {
        let spec = monthly(ChartKind::Line);
        let config = ChartConfig::new().with_series("rate", "Discovery Rate", "#10B981");
        let mut rec = CommandRecorder::new(500.0, 300.0);
        render_axis_chart(&mut rec, &spec, &config, &ChartStyle::default()).unwrap();
        let legend = rec
            .texts()
            .into_iter()
            .find(|t| t.text == "Discovery Rate")
            .unwrap();
        assert_eq!(legend.y, 280.0);
        assert!(rec.rects().iter().any(|r| r.color == "#10B981" && r.x == 60.0));
    }
}
