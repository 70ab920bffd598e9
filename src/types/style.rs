use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Insets between the surface edge and the plot area, in logical pixels.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 20.0,
            bottom: 60.0,
            left: 60.0,
        }
    }
}

/// Visual constants for chart rendering.
///
/// Every field has a default, so a JSON file only needs to list the fields
/// it overrides.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartStyle {
    pub padding: Padding,

    pub background_color: String,
    pub axis_color: String,
    pub grid_color: String,
    pub text_color: String,
    /// Text color for labels drawn on top of pie slices
    pub slice_label_color: String,

    pub title_font: String,
    pub label_font: String,
    pub slice_label_font: String,
    pub legend_font: String,
    /// Baseline of the title, from the top edge
    pub title_y: f64,

    /// Number of intervals between horizontal gridlines (lines = intervals + 1)
    pub gridline_intervals: u32,
    /// Multiplier applied to the data maximum to leave room above the top value
    pub headroom: f64,
    pub line_width: f64,
    /// Two hex digits appended to a `#RRGGBB` series color for area fills
    pub area_alpha: String,

    /// Legend baseline distance from the bottom edge (axis charts)
    pub legend_offset: f64,
    /// Legend baseline distance from the bottom edge (pie charts)
    pub pie_legend_offset: f64,
    /// Fixed column width of axis chart legend entries
    pub legend_column_width: f64,
    /// Space after each measured pie legend entry
    pub legend_gap: f64,
    pub legend_swatch_size: f64,

    /// Space reserved around the pie for labels and legend
    pub pie_margin: f64,
    /// Slice labels sit at this fraction of the radius
    pub slice_label_radius: f64,
    /// Drawn in place of slices when the pie total is not positive
    pub empty_message: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            padding: Padding::default(),
            background_color: "#FFFFFF".to_string(),
            axis_color: "#6B7280".to_string(),
            grid_color: "#E5E7EB".to_string(),
            text_color: "#374151".to_string(),
            slice_label_color: "#FFFFFF".to_string(),
            title_font: "bold 16px sans-serif".to_string(),
            label_font: "12px sans-serif".to_string(),
            slice_label_font: "bold 12px sans-serif".to_string(),
            legend_font: "12px sans-serif".to_string(),
            title_y: 25.0,
            gridline_intervals: 5,
            headroom: 1.1,
            line_width: 2.0,
            area_alpha: "33".to_string(),
            legend_offset: 20.0,
            pie_legend_offset: 30.0,
            legend_column_width: 100.0,
            legend_gap: 20.0,
            legend_swatch_size: 12.0,
            pie_margin: 60.0,
            slice_label_radius: 0.7,
            empty_message: "No data".to_string(),
        }
    }
}

impl ChartStyle {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
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
    fn test_partial_override_keeps_defaults() {
        let style =
            ChartStyle::from_json(r##"{"padding":{"left":80},"gridColor":"#CCCCCC"}"##).unwrap();
        assert_eq!(style.padding.left, 80.0);
        assert_eq!(style.padding.top, 40.0);
        assert_eq!(style.grid_color, "#CCCCCC");
        assert_eq!(style.gridline_intervals, 5);
        assert_eq!(style.headroom, 1.1);
    }

    #[test]
    fn test_round_trips_through_json() {
        let style = ChartStyle::default();
        let json = serde_json::to_string(&style).unwrap();
        assert_eq!(ChartStyle::from_json(&json).unwrap(), style);
    }
}
