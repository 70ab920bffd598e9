//! Chart specs built from dashboard analytics datasets.
//!
//! Every builder returns a `ChartSpec` with realistic data so tests exercise
//! the same shapes a dashboard page feeds the renderer.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use dashchart::{ChartConfig, ChartKind, ChartSpec, DataPoint};

/// Monthly discovery rate, one series keyed `rate`.
pub fn discovery_rate(kind: ChartKind) -> ChartSpec {
    let rows = [
        ("Jun", 8.2),
        ("Jul", 9.1),
        ("Aug", 10.3),
        ("Sep", 11.2),
        ("Oct", 12.5),
    ];
    ChartSpec::new(kind)
        .with_category_key("month")
        .with_series_keys(["rate"])
        .with_points(
            rows.iter()
                .map(|&(month, rate)| DataPoint::new().with("month", month).with("rate", rate))
                .collect(),
        )
}

/// Plaintiffs discovered per source, four series.
pub fn plaintiff_discovery(kind: ChartKind) -> ChartSpec {
    let rows = [
        ("Jun", 42, 28, 18, 12),
        ("Jul", 45, 30, 20, 15),
        ("Aug", 48, 32, 22, 18),
        ("Sep", 52, 35, 24, 19),
        ("Oct", 55, 38, 26, 21),
    ];
    ChartSpec::new(kind)
        .with_category_key("month")
        .with_series_keys(["social", "forums", "complaints", "news"])
        .with_points(
            rows.iter()
                .map(|&(month, social, forums, complaints, news)| {
                    DataPoint::new()
                        .with("month", month)
                        .with("social", social)
                        .with("forums", forums)
                        .with("complaints", complaints)
                        .with("news", news)
                })
                .collect(),
        )
}

/// Display labels for the plaintiff discovery series.
pub fn plaintiff_discovery_config() -> ChartConfig {
    ChartConfig::new()
        .with_series("social", "Social Media", "#3B82F6")
        .with_series("forums", "Medical Forums", "#10B981")
        .with_series("complaints", "Consumer Complaints", "#F59E0B")
        .with_series("news", "News Articles", "#8B5CF6")
}

/// Validation outcome shares, with per-point colors.
pub fn validation_results() -> ChartSpec {
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

/// Claimant counts by age bracket.
pub fn age_distribution() -> ChartSpec {
    let rows = [
        ("18-30", 320),
        ("31-40", 580),
        ("41-50", 720),
        ("51-60", 540),
        ("61-70", 280),
        ("71+", 103),
    ];
    ChartSpec::new(ChartKind::Bar)
        .with_category_key("age")
        .with_series_keys(["count"])
        .with_points(
            rows.iter()
                .map(|&(age, count)| DataPoint::new().with("age", age).with("count", count))
                .collect(),
        )
}

/// Claimant counts by income range; labels contain `<` and `$`.
pub fn income_distribution() -> ChartSpec {
    let rows = [
        ("<$30k", 320),
        ("$30-50k", 480),
        ("$50-75k", 620),
        ("$75-100k", 540),
        ("$100k+", 583),
    ];
    ChartSpec::new(ChartKind::Bar)
        .with_category_key("range")
        .with_series_keys(["count"])
        .with_points(
            rows.iter()
                .map(|&(range, count)| DataPoint::new().with("range", range).with("count", count))
                .collect(),
        )
}

/// `{name, value}` points for quick one-series specs.
pub fn named_values(kind: ChartKind, rows: &[(&str, f64)]) -> ChartSpec {
    ChartSpec::new(kind).with_points(
        rows.iter()
            .map(|&(name, value)| DataPoint::new().with("name", name).with("value", value))
            .collect(),
    )
}
