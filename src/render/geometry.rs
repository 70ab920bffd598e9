//! Scale and layout computation for axis charts.
//!
//! Maps the data domain `[0, max_value]` onto the plot area and the point
//! index onto evenly spaced x positions. Derived once per draw.

use crate::types::{DataPoint, Padding};

/// Pixel-space layout of an axis chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub padding: Padding,
    pub width: f64,
    pub height: f64,
    pub chart_width: f64,
    pub chart_height: f64,
    /// Horizontal distance between consecutive points
    pub x_step: f64,
    /// Largest plotted value times the headroom factor; 0 for empty or
    /// all-zero data
    pub max_value: f64,
    pub point_count: usize,
}

impl Geometry {
    pub fn compute(
        points: &[DataPoint],
        series_keys: &[String],
        width: f64,
        height: f64,
        padding: Padding,
        headroom: f64,
    ) -> Self {
        let chart_width = width - padding.left - padding.right;
        let chart_height = height - padding.top - padding.bottom;
        let point_count = points.len();
        let x_step = chart_width / point_count.saturating_sub(1).max(1) as f64;

        Self {
            padding,
            width,
            height,
            chart_width,
            chart_height,
            x_step,
            max_value: max_value(points, series_keys) * headroom,
            point_count,
        }
    }

    /// X position of the point at `index`.
    pub fn x(&self, index: usize) -> f64 {
        self.padding.left + index as f64 * self.x_step
    }

    /// Y position of `value`; y grows downward.
    pub fn y(&self, value: f64) -> f64 {
        self.baseline() - self.value_height(value)
    }

    /// Height in pixels that `value` spans above the baseline.
    ///
    /// A zero `max_value` collapses every value onto the baseline.
    pub fn value_height(&self, value: f64) -> f64 {
        if self.max_value > 0.0 {
            value / self.max_value * self.chart_height
        } else {
            0.0
        }
    }

    /// Y position of the value-zero line.
    pub fn baseline(&self) -> f64 {
        self.height - self.padding.bottom
    }

    /// Tick values for `intervals + 1` evenly spaced gridlines, bottom up.
    pub fn gridline_values(&self, intervals: u32) -> Vec<f64> {
        let intervals = intervals.max(1);
        (0..=intervals)
            .map(|i| self.max_value * f64::from(i) / f64::from(intervals))
            .collect()
    }

    /// Width of one bar when `series_count` bars share a category slot.
    pub fn bar_width(&self, series_count: usize) -> f64 {
        self.x_step / (series_count + 1) as f64
    }

    /// Left edge of the bar for series `series_index` at point `index`.
    ///
    /// The cluster of `series_count` bars is centered on `x(index)`, then
    /// pushed inward so the first and last clusters stay inside the plot.
    pub fn bar_x(&self, index: usize, series_index: usize, series_count: usize) -> f64 {
        let bar_width = self.bar_width(series_count);
        let cluster = series_count as f64 * bar_width;
        let (left, right) = self.plot_extent();
        let start = (self.x(index) - cluster / 2.0).min(right - cluster).max(left);
        start + series_index as f64 * bar_width
    }

    /// Horizontal extent `(left, right)` of the plot area.
    pub fn plot_extent(&self) -> (f64, f64) {
        (self.padding.left, self.padding.left + self.chart_width)
    }
}

/// Largest value over every point and every key, never below 0.
pub fn max_value(points: &[DataPoint], keys: &[String]) -> f64 {
    points
        .iter()
        .flat_map(|p| keys.iter().map(move |k| p.number(k)))
        .fold(0.0_f64, f64::max)
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

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    fn geometry(points: &[DataPoint], series: &[&str]) -> Geometry {
        Geometry::compute(points, &keys(series), 500.0, 300.0, Padding::default(), 1.1)
    }

    #[test]
    fn test_plot_area() {
        let g = geometry(&[], &["value"]);
        assert_eq!(g.chart_width, 420.0);
        assert_eq!(g.chart_height, 200.0);
        assert_eq!(g.baseline(), 240.0);
    }

    #[test]
    fn test_step_guards_empty_and_single() {
        let g = geometry(&[], &["value"]);
        assert_eq!(g.x_step, 420.0);
        assert_eq!(g.max_value, 0.0);

        let single = vec![DataPoint::new().with("value", 5)];
        let g = geometry(&single, &["value"]);
        assert_eq!(g.x_step, 420.0);
        assert_eq!(g.x(0), 60.0);
    }

    #[test]
    fn test_step_spreads_points_across_width() {
        let points: Vec<_> = (0..5).map(|i| DataPoint::new().with("value", i)).collect();
        let g = geometry(&points, &["value"]);
        assert_eq!(g.x_step, 105.0);
        assert_eq!(g.x(4), 480.0);
    }

    #[test]
    fn test_max_value_headroom_over_all_keys() {
        let points = vec![
            DataPoint::new().with("a", 5).with("b", 15),
            DataPoint::new().with("a", 20).with("b", 1),
        ];
        let g = geometry(&points, &["a", "b"]);
        assert!((g.max_value - 22.0).abs() < 1e-9);
        assert!((g.y(20.0) - (240.0 - 20.0 / 22.0 * 200.0)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_max_collapses_to_baseline() {
        let points = vec![DataPoint::new().with("value", 0)];
        let g = geometry(&points, &["value"]);
        assert_eq!(g.max_value, 0.0);
        assert_eq!(g.y(0.0), g.baseline());
        assert!(g.y(3.0).is_finite());
    }

    #[test]
    fn test_gridline_values() {
        let points = vec![DataPoint::new().with("value", 50)];
        let g = geometry(&points, &["value"]);
        let ticks = g.gridline_values(5);
        assert_eq!(ticks.len(), 6);
        assert_eq!(ticks[0], 0.0);
        assert!((ticks[5] - 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_bar_cluster_is_centered() {
        let points: Vec<_> = (0..3).map(|i| DataPoint::new().with("a", i)).collect();
        let g = geometry(&points, &["a", "b"]);
        let w = g.bar_width(2);
        assert_eq!(w, g.x_step / 3.0);
        let left = g.bar_x(1, 0, 2);
        let right = g.bar_x(1, 1, 2) + w;
        assert!(((left + right) / 2.0 - g.x(1)).abs() < 1e-9);
    }

    #[test]
    fn test_edge_clusters_are_pushed_into_plot() {
        let single = vec![DataPoint::new().with("a", 10).with("b", 20)];
        let g = geometry(&single, &["a", "b"]);
        assert_eq!(g.bar_width(2), 140.0);
        assert_eq!(g.bar_x(0, 0, 2), 60.0);
        assert_eq!(g.bar_x(0, 1, 2), 200.0);

        let points: Vec<_> = (0..5).map(|i| DataPoint::new().with("a", i)).collect();
        let g = geometry(&points, &["a"]);
        assert_eq!(g.bar_x(0, 0, 1), 60.0);
        assert_eq!(g.bar_x(2, 0, 1), g.x(2) - 52.5 / 2.0);
        assert_eq!(g.bar_x(4, 0, 1) + g.bar_width(1), 480.0);
    }
}
