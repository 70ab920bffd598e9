//! JSON input tests.
//!
//! Decodes chart specs, series configs and styles in their prop/JSON form
//! (including the files under `demos/`) and renders them.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{filled_paths, find_text, render, render_styled, stroked_paths};
use dashchart::{
    render_commands, ChartConfig, ChartKind, ChartSpec, ChartStyle, DashchartError, DataValue,
    DrawCommand,
};
use test_case::test_case;

const PLAINTIFF_SPEC: &str = include_str!("../demos/plaintiff_discovery.json");
const PLAINTIFF_CONFIG: &str = include_str!("../demos/plaintiff_discovery.config.json");
const VALIDATION_SPEC: &str = include_str!("../demos/validation_results.json");
const DISCOVERY_SPEC: &str = include_str!("../demos/discovery_rate.json");
const DARK_STYLE: &str = include_str!("../demos/dark.style.json");

#[test]
fn defaults_fill_missing_props() {
    let spec = ChartSpec::from_json(r#"{"data": [{"name": "Jan", "value": 3}]}"#).unwrap();
    assert_eq!(spec.kind, ChartKind::Line);
    assert_eq!(spec.category_key, "name");
    assert_eq!(spec.series_keys, vec!["value"]);
    assert_eq!((spec.width, spec.height), (500, 300));
    assert_eq!(spec.class_name, None);
    assert_eq!(spec.color_key, "color");
}

#[test]
fn demo_spec_props_decode() {
    let spec = ChartSpec::from_json(PLAINTIFF_SPEC).unwrap();
    assert_eq!(spec.kind, ChartKind::Bar);
    assert_eq!(spec.category_key, "month");
    assert_eq!(spec.series_keys.len(), 4);
    assert_eq!((spec.width, spec.height), (640, 320));
    assert_eq!(spec.class_name.as_deref(), Some("h-[320px]"));
    assert_eq!(spec.points.len(), 5);
    // field order survives decoding
    let keys: Vec<&str> = spec.points[0].keys().collect();
    assert_eq!(keys, vec!["month", "social", "forums", "complaints", "news"]);
}

#[test_case("line", ChartKind::Line)]
#[test_case("bar", ChartKind::Bar)]
#[test_case("area", ChartKind::Area)]
#[test_case("pie", ChartKind::Pie)]
fn chart_type_names(name: &str, kind: ChartKind) {
    let spec = ChartSpec::from_json(&format!(r#"{{"type": "{name}"}}"#)).unwrap();
    assert_eq!(spec.kind, kind);
    assert_eq!(name.parse::<ChartKind>().unwrap(), kind);
}

#[test]
fn unknown_chart_type_is_rejected() {
    let err = ChartSpec::from_json(r#"{"type": "radar"}"#).unwrap_err();
    assert!(matches!(err, DashchartError::Json(_)));
    assert!(matches!(
        "radar".parse::<ChartKind>(),
        Err(DashchartError::InvalidSpec(_))
    ));
}

#[test]
fn mixed_value_types_coerce() {
    let spec = ChartSpec::from_json(
        r#"{"type": "bar", "data": [
            {"name": "A", "value": "12.5"},
            {"name": "B", "value": null},
            {"name": "C", "value": true},
            {"name": 2024, "value": "n/a"}
        ]}"#,
    )
    .unwrap();
    let values: Vec<f64> = spec.points.iter().map(|p| p.number("value")).collect();
    assert_eq!(values, vec![12.5, 0.0, 1.0, 0.0]);
    assert_eq!(spec.points[3].get("name"), Some(&DataValue::Number(2024.0)));
    assert_eq!(spec.category_labels()[3], "2024");
}

#[test]
fn demo_config_labels_and_colors() {
    let spec = ChartSpec::from_json(PLAINTIFF_SPEC).unwrap();
    let config = ChartConfig::from_json(PLAINTIFF_CONFIG).unwrap();
    assert_eq!(config.label_for("forums"), "Medical Forums");
    assert_eq!(config.label_for("unknown"), "unknown");

    let rec = render(&spec, &config);
    assert!(find_text(&rec, "Consumer Complaints").is_some());
    let colors: Vec<String> = rec.rects().into_iter().map(|r| r.color).collect();
    assert!(colors.iter().any(|c| c == "hsl(217 91% 60%)"));
    assert!(colors.iter().any(|c| c == "#10B981"));
    // `var(...)` cannot be resolved, so news falls back to palette slot 3,
    // which matches the complaints color: 5 bars and a swatch each
    assert_eq!(colors.iter().filter(|c| *c == "#F59E0B").count(), 12);
    assert!(!colors.iter().any(|c| c.contains("var(")));
}

#[test]
fn demo_pie_colors_from_points() {
    let spec = ChartSpec::from_json(VALIDATION_SPEC).unwrap();
    let rec = render(&spec, &ChartConfig::default());
    let fills: Vec<String> = filled_paths(&rec).into_iter().filter_map(|p| p.fill).collect();
    assert_eq!(fills, vec!["#4ADE80", "#FACC15", "#F87171"]);
}

#[test]
fn custom_color_key() {
    let spec = ChartSpec::from_json(
        r##"{"type": "pie", "colorKey": "fill", "data": [
            {"name": "A", "value": 1, "fill": "#000"},
            {"name": "B", "value": 1, "color": "#fff"}
        ]}"##,
    )
    .unwrap();
    let rec = render(&spec, &ChartConfig::default());
    let fills: Vec<String> = filled_paths(&rec).into_iter().filter_map(|p| p.fill).collect();
    assert_eq!(fills[0], "#000000");
    // "color" is not the color key here, so B takes the palette
    assert_eq!(fills[1], "#EF4444");
}

#[test]
fn style_overrides_merge_with_defaults() {
    let style = ChartStyle::from_json(DARK_STYLE).unwrap();
    assert_eq!(style.background_color, "#111827");
    assert_eq!(style.padding.left, 70.0);
    assert_eq!(style.padding.top, 40.0);
    assert_eq!(style.title_font, ChartStyle::default().title_font);

    let spec = ChartSpec::from_json(DISCOVERY_SPEC).unwrap();
    let rec = render_styled(&spec, &ChartConfig::default(), &style);
    assert_eq!(rec.rects()[0].color, "#111827");
    let line = &stroked_paths(&rec, "#3B82F6")[0];
    assert_eq!(line.points[0].0, 70.0);
}

#[test]
fn commands_serialize_with_op_tags() {
    let spec = ChartSpec::from_json(DISCOVERY_SPEC).unwrap();
    let commands = render_commands(&spec, &ChartConfig::default(), &ChartStyle::default()).unwrap();
    assert!(matches!(commands[0], DrawCommand::ClearRect { .. }));

    let json = serde_json::to_value(&commands).unwrap();
    assert_eq!(json[0]["op"], "clearRect");
    assert_eq!(json[1]["op"], "setFillStyle");
    assert_eq!(json[1]["color"], "#FFFFFF");

    let decoded: Vec<DrawCommand> = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, commands);
}
