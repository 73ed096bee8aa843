use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key of the synthetic averaged dataset in the combined mapping.
pub const OVERALL: &str = "overall";

/// One country's price level index within a category.
///
/// Persisted as the two-element array `["<country>", <value>]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, f64)", into = "(String, f64)")]
pub struct PriceRecord {
    pub country: String,
    pub value: f64,
}

impl PriceRecord {
    pub fn new(country: impl Into<String>, value: f64) -> Self {
        Self {
            country: country.into(),
            value,
        }
    }
}

impl From<(String, f64)> for PriceRecord {
    fn from((country, value): (String, f64)) -> Self {
        Self { country, value }
    }
}

impl From<PriceRecord> for (String, f64) {
    fn from(record: PriceRecord) -> Self {
        (record.country, record.value)
    }
}

/// Combined mapping of category name (plus [`OVERALL`]) to its dataset.
pub type CombinedPrices = BTreeMap<String, Vec<PriceRecord>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_as_pair() {
        let record = PriceRecord::new("Malta", 77.8);
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"["Malta",77.8]"#);
    }

    #[test]
    fn test_record_round_trips() {
        let json = r#"["Bosnia and Herzegovina",75.3]"#;
        let record: PriceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, PriceRecord::new("Bosnia and Herzegovina", 75.3));
        assert_eq!(serde_json::to_string(&record).unwrap(), json);
    }

    #[test]
    fn test_dataset_shape() {
        let dataset = vec![
            PriceRecord::new("Malta", 77.8),
            PriceRecord::new("Poland", 75.3),
        ];
        let json = serde_json::to_string(&dataset).unwrap();
        assert_eq!(json, r#"[["Malta",77.8],["Poland",75.3]]"#);
    }
}
