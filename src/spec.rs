//! Property specifications: what to group by at each level.
//!
//! A level is either categorical (bucket by exact value) or range
//! (bucket by numeric interval). The duality is decided once, at
//! construction or deserialization time, never re-inspected per item.

use serde::Deserialize;

/// One grouping level
///
/// Deserializes from the same shapes the original JSON API accepts:
/// a bare string is a categorical path, an object with `property` and
/// `intervals` is a range spec.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PropertySpec {
    /// Bucket by exact property value (multi-membership for arrays)
    Categorical(String),
    /// Bucket by which sorted interval a numeric property falls into
    Range(RangeSpec),
}

impl PropertySpec {
    /// Categorical grouping by a dotted property path
    pub fn categorical(path: impl Into<String>) -> Self {
        PropertySpec::Categorical(path.into())
    }

    /// Range grouping over ascending interval boundaries
    pub fn range(property: impl Into<String>, intervals: Vec<f64>) -> Self {
        PropertySpec::Range(RangeSpec {
            property: property.into(),
            intervals,
            labels: None,
        })
    }
}

impl From<&str> for PropertySpec {
    fn from(path: &str) -> Self {
        PropertySpec::Categorical(path.to_string())
    }
}

/// Range grouping specification
///
/// `intervals` must be sorted ascending (assumed, not enforced).
/// With `k` boundaries there are `k - 1` buckets. If `labels` is
/// supplied it should have one entry per bucket.
#[derive(Debug, Clone, Deserialize)]
pub struct RangeSpec {
    /// Dotted path to the numeric property
    pub property: String,

    /// Ascending bucket boundaries
    #[serde(default)]
    pub intervals: Vec<f64>,

    /// Optional bucket names; buckets fall back to numeric indices
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

impl RangeSpec {
    /// Attach labels, one per bucket
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_categorical_from_string() {
        let spec: PropertySpec = serde_json::from_str("\"color\"").unwrap();
        assert!(matches!(spec, PropertySpec::Categorical(ref p) if p == "color"));
    }

    #[test]
    fn test_deserialize_range_from_object() {
        let raw = r#"{ "property": "price", "intervals": [10, 20, 40, 50], "labels": ["low", "medium", "high"] }"#;
        let spec: PropertySpec = serde_json::from_str(raw).unwrap();
        match spec {
            PropertySpec::Range(range) => {
                assert_eq!(range.property, "price");
                assert_eq!(range.intervals, vec![10.0, 20.0, 40.0, 50.0]);
                assert_eq!(
                    range.labels,
                    Some(vec![
                        "low".to_string(),
                        "medium".to_string(),
                        "high".to_string()
                    ])
                );
            }
            PropertySpec::Categorical(_) => panic!("expected range spec"),
        }
    }

    #[test]
    fn test_deserialize_range_without_intervals() {
        let spec: PropertySpec = serde_json::from_str(r#"{ "property": "price" }"#).unwrap();
        match spec {
            PropertySpec::Range(range) => assert!(range.intervals.is_empty()),
            PropertySpec::Categorical(_) => panic!("expected range spec"),
        }
    }

    #[test]
    fn test_spec_list_deserializes_mixed() {
        let raw = r#"["color", { "property": "price", "intervals": [0, 30, 60] }]"#;
        let specs: Vec<PropertySpec> = serde_json::from_str(raw).unwrap();
        assert_eq!(specs.len(), 2);
        assert!(matches!(specs[0], PropertySpec::Categorical(_)));
        assert!(matches!(specs[1], PropertySpec::Range(_)));
    }
}
