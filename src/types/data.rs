use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::numfmt::format_number;

/// A single field value of a data point.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum DataValue {
    /// Numeric value
    Number(f64),
    /// Boolean flag (plots as 1 or 0)
    Bool(bool),
    /// Text label (plots as its numeric parse, or 0)
    Text(String),
}

impl DataValue {
    /// Numeric value used for plotting.
    ///
    /// Non-numeric text and non-finite numbers coerce to 0.
    pub fn as_number(&self) -> f64 {
        let value = match self {
            Self::Number(v) => *v,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }

    /// Text used for category labels.
    pub fn label(&self) -> String {
        match self {
            Self::Number(v) => format_number(*v),
            Self::Bool(b) => b.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// Borrow the text if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for DataValue {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<u32> for DataValue {
    fn from(v: u32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// One record of chart input: an ordered mapping from field name to value.
///
/// Field order is preserved exactly as inserted or deserialized. Setting a
/// key that already exists replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataPoint {
    fields: Vec<(String, DataValue)>,
}

impl DataPoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<DataValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<DataValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.fields.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&DataValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Plotted value for `key`; missing fields read as 0.
    pub fn number(&self, key: &str) -> f64 {
        self.get(key).map_or(0.0, DataValue::as_number)
    }

    /// Label for `key`; missing fields read as an empty string.
    pub fn label(&self, key: &str) -> String {
        self.get(key).map(DataValue::label).unwrap_or_default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }
}

impl Serialize for DataPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DataPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PointVisitor;

        impl<'de> Visitor<'de> for PointVisitor {
            type Value = DataPoint;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of field names to numbers or labels")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<DataPoint, A::Error> {
                let mut point = DataPoint::new();
                while let Some((key, value)) = access.next_entry::<String, Option<DataValue>>()? {
                    // null reads the same as an absent field
                    if let Some(value) = value {
                        point.insert(key, value);
                    }
                }
                Ok(point)
            }
        }

        deserializer.deserialize_map(PointVisitor)
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
    fn test_missing_field_reads_zero() {
        let point = DataPoint::new().with("name", "Jan");
        assert_eq!(point.number("value"), 0.0);
        assert_eq!(point.label("missing"), "");
    }

    #[test]
    fn test_text_coercion() {
        assert_eq!(DataValue::from(" 12.5 ").as_number(), 12.5);
        assert_eq!(DataValue::from("n/a").as_number(), 0.0);
        assert_eq!(DataValue::from(true).as_number(), 1.0);
        assert_eq!(DataValue::Number(f64::NAN).as_number(), 0.0);
    }

    #[test]
    fn test_number_label_drops_trailing_zero() {
        assert_eq!(DataValue::from(2024).label(), "2024");
        assert_eq!(DataValue::from(8.25).label(), "8.25");
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut point = DataPoint::new().with("a", 1).with("b", 2);
        point.insert("a", 5);
        assert_eq!(point.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(point.number("a"), 5.0);
    }

    #[test]
    fn test_deserialize_preserves_order_and_skips_null() {
        let point: DataPoint =
            serde_json::from_str(r#"{"month":"Jun","social":42,"forums":null,"news":12}"#)
                .unwrap();
        assert_eq!(point.keys().collect::<Vec<_>>(), vec!["month", "social", "news"]);
        assert_eq!(point.number("forums"), 0.0);

        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"month":"Jun","social":42.0,"news":12.0}"#);
    }
}
