use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Display settings for one series key (or one pie slice label).
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesConfig {
    /// Legend label shown instead of the raw key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// CSS color used instead of the palette color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Per-series labels and colors, keyed by series key.
///
/// Serialized as a plain object: `{"social": {"label": "Social Media",
/// "color": "#3B82F6"}}`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ChartConfig {
    entries: BTreeMap<String, SeriesConfig>,
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder-style insert of a label and color for `key`.
    #[must_use]
    pub fn with_series(
        mut self,
        key: impl Into<String>,
        label: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        self.insert(
            key,
            SeriesConfig {
                label: Some(label.into()),
                color: Some(color.into()),
            },
        );
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, series: SeriesConfig) {
        self.entries.insert(key.into(), series);
    }

    pub fn get(&self, key: &str) -> Option<&SeriesConfig> {
        self.entries.get(key)
    }

    /// Legend label for `key`, falling back to the key itself.
    pub fn label_for<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key)
            .and_then(|s| s.label.as_deref())
            .unwrap_or(key)
    }

    /// Raw configured color for `key`, if any.
    pub fn color_for(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|s| s.color.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
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
    fn test_label_fallback() {
        let config = ChartConfig::new().with_series("social", "Social Media", "#3B82F6");
        assert_eq!(config.label_for("social"), "Social Media");
        assert_eq!(config.label_for("forums"), "forums");
        assert_eq!(config.color_for("social"), Some("#3B82F6"));
        assert_eq!(config.color_for("forums"), None);
    }

    #[test]
    fn test_json_shape() {
        let config = ChartConfig::from_json(
            r#"{"validated":{"label":"Validated","color":"hsl(var(--chart-1))"},"pending":{}}"#,
        )
        .unwrap();
        assert_eq!(config.label_for("validated"), "Validated");
        assert_eq!(config.label_for("pending"), "pending");
        assert!(!config.is_empty());
    }
}
