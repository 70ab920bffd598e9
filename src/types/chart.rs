use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::data::DataPoint;
use crate::error::{DashchartError, Result};

/// Type of chart
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    /// Polyline per series
    #[default]
    Line,
    /// Clustered vertical bars
    Bar,
    /// Polyline per series, filled down to the baseline
    Area,
    /// Proportional sectors of the first series
    Pie,
}

impl ChartKind {
    /// Title drawn at the top of the chart.
    pub fn title(self) -> &'static str {
        match self {
            Self::Line => "Line Chart",
            Self::Bar => "Bar Chart",
            Self::Area => "Area Chart",
            Self::Pie => "Pie Chart",
        }
    }

    /// Whether the chart is drawn on x/y axes.
    pub fn is_cartesian(self) -> bool {
        !matches!(self, Self::Pie)
    }
}

impl FromStr for ChartKind {
    type Err = DashchartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "bar" => Ok(Self::Bar),
            "area" => Ok(Self::Area),
            "pie" => Ok(Self::Pie),
            other => Err(DashchartError::InvalidSpec(format!(
                "unknown chart type '{other}'"
            ))),
        }
    }
}

fn default_category_key() -> String {
    "name".to_string()
}

fn default_series_keys() -> Vec<String> {
    vec!["value".to_string()]
}

fn default_color_key() -> String {
    "color".to_string()
}

const fn default_width() -> u32 {
    500
}

const fn default_height() -> u32 {
    300
}

/// Everything needed to draw one chart.
///
/// Field names on the wire follow the chart component's props (`data`,
/// `type`, `xKey`, `yKeys`, `width`, `height`, `className`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    /// Source points, drawn in order
    #[serde(rename = "data", default)]
    pub points: Vec<DataPoint>,
    /// Which drawer to use
    #[serde(rename = "type", default)]
    pub kind: ChartKind,
    /// Field holding the category (axis charts) or slice label (pie)
    #[serde(rename = "xKey", default = "default_category_key")]
    pub category_key: String,
    /// Fields plotted as dependent values; pie uses only the first
    #[serde(rename = "yKeys", default = "default_series_keys")]
    pub series_keys: Vec<String>,
    /// Surface width in logical pixels
    #[serde(default = "default_width")]
    pub width: u32,
    /// Surface height in logical pixels
    #[serde(default = "default_height")]
    pub height: u32,
    /// Styling hook passed through to the host element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Optional per-point color field, honored by pie slices
    #[serde(default = "default_color_key")]
    pub color_key: String,
}

impl Default for ChartSpec {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            kind: ChartKind::default(),
            category_key: default_category_key(),
            series_keys: default_series_keys(),
            width: default_width(),
            height: default_height(),
            class_name: None,
            color_key: default_color_key(),
        }
    }
}

impl ChartSpec {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Decode a spec from its JSON prop form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_points(mut self, points: Vec<DataPoint>) -> Self {
        self.points = points;
        self
    }

    #[must_use]
    pub fn with_category_key(mut self, key: impl Into<String>) -> Self {
        self.category_key = key.into();
        self
    }

    #[must_use]
    pub fn with_series_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.series_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Series keys the active drawer plots: all of them for axis charts,
    /// at most the first one for pie charts.
    pub fn plotted_keys(&self) -> &[String] {
        if self.kind.is_cartesian() {
            &self.series_keys
        } else {
            self.series_keys.get(..1).unwrap_or(&[])
        }
    }

    /// Category label of every point, in order.
    pub fn category_labels(&self) -> Vec<String> {
        self.points
            .iter()
            .map(|p| p.label(&self.category_key))
            .collect()
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
    fn test_defaults_from_empty_object() {
        let spec = ChartSpec::from_json("{}").unwrap();
        assert_eq!(spec, ChartSpec::default());
        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.category_key, "name");
        assert_eq!(spec.series_keys, vec!["value".to_string()]);
        assert_eq!((spec.width, spec.height), (500, 300));
    }

    #[test]
    fn test_prop_names() {
        let spec = ChartSpec::from_json(
            r#"{"data":[{"month":"Jun","rate":8.2}],"type":"area","xKey":"month",
                "yKeys":["rate"],"width":320,"height":80,"className":"h-20"}"#,
        )
        .unwrap();
        assert_eq!(spec.kind, ChartKind::Area);
        assert_eq!(spec.category_labels(), vec!["Jun".to_string()]);
        assert_eq!(spec.plotted_keys(), &["rate".to_string()]);
        assert_eq!(spec.class_name.as_deref(), Some("h-20"));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(ChartSpec::from_json(r#"{"type":"radar"}"#).is_err());
        assert!("donut".parse::<ChartKind>().is_err());
        assert_eq!(" Pie ".parse::<ChartKind>().unwrap(), ChartKind::Pie);
    }

    #[test]
    fn test_pie_plots_first_key_only() {
        let spec = ChartSpec::new(ChartKind::Pie).with_series_keys(["a", "b"]);
        assert_eq!(spec.plotted_keys(), &["a".to_string()]);

        let empty = ChartSpec::new(ChartKind::Pie).with_series_keys(Vec::<String>::new());
        assert!(empty.plotted_keys().is_empty());
    }

    #[test]
    fn test_titles() {
        assert_eq!(ChartKind::Bar.title(), "Bar Chart");
        assert!(!ChartKind::Pie.is_cartesian());
    }
}
