//! End-to-end rendering tests.
//!
//! Each test renders a full frame into the command recorder and checks the
//! geometry of what was drawn:
//! - Line, area and bar marks
//! - Pie sectors, labels and percentage legend
//! - Empty, single-point and all-zero data
//! - Frame idempotence
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;
mod fixtures;

use std::f64::consts::{PI, TAU};

use common::{assert_close, bars, filled_paths, find_text, render, stroked_paths, texts_aligned};
use dashchart::render::geometry::{max_value, Geometry};
use dashchart::render::{palette_color, PieLayout};
use dashchart::{
    render_commands, ChartConfig, ChartKind, ChartSpec, ChartStyle, DataPoint, TextAlign,
};
use test_case::test_case;

const BLUE: &str = "#3B82F6";

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn line_second_point_above_first() {
    let spec = fixtures::named_values(ChartKind::Line, &[("Jan", 10.0), ("Feb", 20.0)]);
    let rec = render(&spec, &ChartConfig::default());

    let lines = stroked_paths(&rec, BLUE);
    assert_eq!(lines.len(), 1);
    let points = &lines[0].points;
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].0, 60.0);
    assert_eq!(points[1].0, 480.0);
    assert!(points[1].1 < points[0].1);
    // max 20 * 1.1 = 22 over a 200px plot
    assert_close(points[0].1, 240.0 - 10.0 / 22.0 * 200.0);
}

#[test]
fn pie_equal_halves() {
    let spec = fixtures::named_values(ChartKind::Pie, &[("A", 50.0), ("B", 50.0)]);
    let rec = render(&spec, &ChartConfig::default());

    let slices = filled_paths(&rec);
    assert_eq!(slices.len(), 2);
    for slice in &slices {
        let (start, end) = slice.arcs[0];
        assert_close(end - start, PI);
    }
    assert_eq!(slices[0].arcs[0].0, 0.0);
    assert!(find_text(&rec, "A: 50.0%").is_some());
    assert!(find_text(&rec, "B: 50.0%").is_some());
}

#[test_case(ChartKind::Line, "Line Chart" ; "line")]
#[test_case(ChartKind::Bar, "Bar Chart" ; "bar")]
#[test_case(ChartKind::Area, "Area Chart" ; "area")]
#[test_case(ChartKind::Pie, "Pie Chart" ; "pie")]
fn empty_data_draws_background_and_title(kind: ChartKind, title: &str) {
    let rec = render(&ChartSpec::new(kind), &ChartConfig::default());

    let rects = rec.rects();
    assert_eq!(rects.len(), 1);
    assert_eq!((rects[0].w, rects[0].h), (500.0, 300.0));
    let texts = rec.texts();
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].text, title);
    assert!(rec.paths().is_empty());
}

#[test]
fn single_point_bar_cluster_sits_inside_plot() {
    let spec = ChartSpec::new(ChartKind::Bar)
        .with_series_keys(["a", "b"])
        .with_points(vec![DataPoint::new()
            .with("name", "X")
            .with("a", 5)
            .with("b", 15)]);
    let rec = render(&spec, &ChartConfig::default());
    let style = ChartStyle::default();

    let a = bars(&rec, palette_color(0), style.legend_swatch_size);
    let b = bars(&rec, palette_color(1), style.legend_swatch_size);
    assert_eq!((a.len(), b.len()), (1, 1));
    let (a, b) = (&a[0], &b[0]);

    assert_close(a.x, 60.0);
    assert_close(a.x + a.w, b.x);
    assert!(b.x + b.w <= 480.0);
    assert!(b.h > a.h);
    assert_close(a.y + a.h, 240.0);
    assert_close(b.y + b.h, 240.0);

    // Tick labels end at x=50, left of every bar
    let ticks = texts_aligned(&rec, TextAlign::Right);
    assert!(ticks.iter().all(|t| t.x < a.x));
}

#[test]
fn max_value_spans_every_series() {
    let spec = fixtures::plaintiff_discovery(ChartKind::Line);
    assert_eq!(max_value(&spec.points, &spec.series_keys), 55.0);
    let only_news = vec!["news".to_string()];
    assert_eq!(max_value(&spec.points, &only_news), 21.0);
}

#[test_case(ChartKind::Line ; "line")]
#[test_case(ChartKind::Area ; "area")]
#[test_case(ChartKind::Bar ; "bar")]
fn zero_values_sit_on_baseline(kind: ChartKind) {
    let spec = ChartSpec::new(kind)
        .with_series_keys(["value", "missing"])
        .with_points(vec![
            DataPoint::new().with("name", "A").with("value", 0),
            DataPoint::new().with("name", "B").with("value", 8),
        ]);
    let style = ChartStyle::default();
    let geometry = Geometry::compute(
        &spec.points,
        &spec.series_keys,
        500.0,
        300.0,
        style.padding,
        style.headroom,
    );
    assert_eq!(geometry.y(0.0), 300.0 - style.padding.bottom);

    let rec = render(&spec, &ChartConfig::default());
    match kind {
        ChartKind::Bar => {
            // the "missing" series coerces to zero-height bars
            let missing = bars(&rec, palette_color(1), style.legend_swatch_size);
            assert_eq!(missing.len(), 2);
            for bar in missing {
                assert_eq!(bar.h, 0.0);
                assert_eq!(bar.y, 240.0);
            }
        }
        _ => {
            let missing = stroked_paths(&rec, palette_color(1));
            assert_eq!(missing.len(), 1);
            assert!(missing[0].points.iter().all(|&(_, y)| y == 240.0));
        }
    }
}

#[test]
fn all_zero_line_is_flat_and_finite() {
    let spec = fixtures::named_values(ChartKind::Line, &[("A", 0.0), ("B", 0.0), ("C", 0.0)]);
    let rec = render(&spec, &ChartConfig::default());
    let line = &stroked_paths(&rec, BLUE)[0];
    assert!(line.points.iter().all(|&(x, y)| x.is_finite() && y == 240.0));

    let ticks = texts_aligned(&rec, TextAlign::Right);
    assert_eq!(ticks.len(), 6);
    assert!(ticks.iter().all(|t| t.text == "0.0"));
}

#[test]
fn single_point_at_left_padding() {
    let spec = fixtures::named_values(ChartKind::Line, &[("Only", 4.0)]);
    let rec = render(&spec, &ChartConfig::default());
    let line = &stroked_paths(&rec, BLUE)[0];
    assert_eq!(line.points, vec![(60.0, 240.0 - 4.0 / 4.4 * 200.0)]);

    let label = find_text(&rec, "Only").unwrap();
    assert_eq!(label.x, 60.0);
}

#[test_case(fixtures::discovery_rate(ChartKind::Bar), 5 ; "five points one series")]
#[test_case(fixtures::plaintiff_discovery(ChartKind::Bar), 20 ; "five points four series")]
#[test_case(fixtures::age_distribution(), 6 ; "six points")]
fn every_bar_lies_within_plot(spec: ChartSpec, expected_bars: usize) {
    let style = ChartStyle::default();
    let rec = render(&spec, &ChartConfig::default());
    let plot_left = style.padding.left;
    let plot_right = f64::from(spec.width) - style.padding.right;

    let all: Vec<_> = (0..spec.series_keys.len())
        .flat_map(|k| bars(&rec, palette_color(k), style.legend_swatch_size))
        .collect();
    assert_eq!(all.len(), expected_bars);
    for bar in &all {
        assert!(bar.x >= plot_left - 1e-9, "bar starts at {}", bar.x);
        assert!(bar.x + bar.w <= plot_right + 1e-9, "bar ends at {}", bar.x + bar.w);
    }
}

#[test]
fn pie_angles_sum_to_full_turn() {
    let layout = PieLayout::compute(
        &fixtures::validation_results(),
        &ChartConfig::default(),
        &ChartStyle::default(),
    );
    let swept: f64 = layout.slices.iter().map(|s| s.sweep()).sum();
    assert_close(swept, TAU);
    assert_eq!(layout.slices[0].start_angle, 0.0);
    for pair in layout.slices.windows(2) {
        assert_eq!(pair[0].end_angle, pair[1].start_angle);
    }
}

#[test]
fn pie_uses_point_colors_and_percentages() {
    let rec = render(&fixtures::validation_results(), &ChartConfig::default());
    let fills: Vec<_> = filled_paths(&rec)
        .into_iter()
        .filter_map(|p| p.fill)
        .collect();
    assert_eq!(fills, vec!["#4ADE80", "#FACC15", "#F87171"]);
    assert!(find_text(&rec, "Validated: 73.8%").is_some());
    assert!(find_text(&rec, "Pending: 22.7%").is_some());
    assert!(find_text(&rec, "Flagged: 3.5%").is_some());
}

#[test]
fn pie_plots_only_first_series() {
    let spec = ChartSpec::new(ChartKind::Pie)
        .with_series_keys(["value", "other"])
        .with_points(vec![
            DataPoint::new().with("name", "A").with("value", 1).with("other", 100),
            DataPoint::new().with("name", "B").with("value", 3).with("other", 0),
        ]);
    let rec = render(&spec, &ChartConfig::default());
    assert!(find_text(&rec, "A: 25.0%").is_some());
    assert!(find_text(&rec, "B: 75.0%").is_some());
}

#[test]
fn pie_without_series_keys_shows_placeholder() {
    let spec = ChartSpec::new(ChartKind::Pie)
        .with_series_keys(Vec::<String>::new())
        .with_points(vec![
            DataPoint::new().with("name", "A").with("value", 40),
            DataPoint::new().with("name", "B").with("value", 60),
        ]);
    let rec = render(&spec, &ChartConfig::default());

    assert!(filled_paths(&rec).is_empty());
    let placeholder = find_text(&rec, "No data").unwrap();
    assert_eq!((placeholder.x, placeholder.y), (250.0, 150.0));
    assert!(find_text(&rec, "A: 0.0%").is_some());
    assert!(find_text(&rec, "B: 0.0%").is_some());
}

#[test]
fn pie_legend_advances_by_measured_width() {
    let rec = render(&fixtures::validation_results(), &ChartConfig::default());
    let style = ChartStyle::default();
    let legend: Vec<_> = rec
        .texts()
        .into_iter()
        .filter(|t| t.text.ends_with('%'))
        .collect();
    assert_eq!(legend.len(), 3);
    for text in &legend {
        assert_eq!(text.y, 300.0 - style.pie_legend_offset);
    }
    // measured widths differ, so the gaps between entries differ too
    let gap_a = legend[1].x - legend[0].x;
    let gap_b = legend[2].x - legend[1].x;
    assert!(gap_a > 0.0 && gap_b > 0.0);
    assert!((gap_a - gap_b).abs() > 1e-9);
}

#[test]
fn axis_legend_uses_config_labels() {
    let rec = render(
        &fixtures::plaintiff_discovery(ChartKind::Area),
        &fixtures::plaintiff_discovery_config(),
    );
    let labels = ["Social Media", "Medical Forums", "Consumer Complaints", "News Articles"];
    let xs: Vec<f64> = labels
        .iter()
        .map(|label| find_text(&rec, label).unwrap().x)
        .collect();
    for pair in xs.windows(2) {
        assert_close(pair[1] - pair[0], 100.0);
    }
    assert_eq!(filled_paths(&rec).len(), 4);
}

#[test]
fn unresolvable_config_color_falls_back_to_palette() {
    let config = ChartConfig::new().with_series("rate", "Rate", "hsl(var(--chart-1))");
    let rec = render(&fixtures::discovery_rate(ChartKind::Line), &config);
    assert_eq!(stroked_paths(&rec, palette_color(0)).len(), 1);
}

#[test]
fn income_labels_are_drawn_verbatim() {
    let rec = render(&fixtures::income_distribution(), &ChartConfig::default());
    let labels = texts_aligned(&rec, TextAlign::Center);
    assert!(labels.iter().any(|t| t.text == "<$30k"));
    assert!(labels.iter().any(|t| t.text == "$100k+"));
}

// ============================================================================
// Idempotence
// ============================================================================

#[test_case(fixtures::discovery_rate(ChartKind::Line) ; "line")]
#[test_case(fixtures::plaintiff_discovery(ChartKind::Bar) ; "bar")]
#[test_case(fixtures::plaintiff_discovery(ChartKind::Area) ; "area")]
#[test_case(fixtures::validation_results() ; "pie")]
#[test_case(fixtures::age_distribution() ; "age bars")]
fn rendering_is_idempotent(spec: ChartSpec) {
    let config = fixtures::plaintiff_discovery_config();
    let style = ChartStyle::default();
    let first = render_commands(&spec, &config, &style).unwrap();
    let second = render_commands(&spec, &config, &style).unwrap();
    assert_eq!(first, second);
}
