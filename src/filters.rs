use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::prices::PriceRecord;

/// Sentinel label for aggregate rows that must not chart or average downstream.
///
/// Rewritten rows keep their position so that datasets stay aligned across
/// categories.
pub const EXCLUDE: &str = "Exclude";

/// A label rewrite: any geo label containing `pattern` becomes `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRewrite {
    pub pattern: String,
    pub replacement: String,
}

impl LabelRewrite {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Rewrites for the label anomalies Eurostat is known to ship.
pub fn default_rewrites() -> Vec<LabelRewrite> {
    vec![
        LabelRewrite::new("former territory of the FRG", "Germany"),
        LabelRewrite::new("Candidate and potential candidate countries", EXCLUDE),
    ]
}

/// Typed view of the slice of the Eurostat payload the pipeline consumes.
#[derive(Debug, Deserialize)]
struct RawPrices {
    /// Position (as a string) → price level value.
    value: HashMap<String, f64>,
    dimension: Dimension,
}

#[derive(Debug, Deserialize)]
struct Dimension {
    geo: Geo,
}

#[derive(Debug, Deserialize)]
struct Geo {
    category: GeoCategory,
}

#[derive(Debug, Deserialize)]
struct GeoCategory {
    /// Country code → position in the value map.
    index: HashMap<String, usize>,
    /// Country code → display label.
    label: HashMap<String, String>,
}

/// Extract (country, value) pairs ordered by position ascending, applying the
/// default rewrites.
pub fn filter_prices(raw: &Value) -> Result<Vec<PriceRecord>, AppError> {
    filter_prices_with(raw, &default_rewrites())
}

/// As [`filter_prices`], with an explicit rewrite table.
pub fn filter_prices_with(
    raw: &Value,
    rewrites: &[LabelRewrite],
) -> Result<Vec<PriceRecord>, AppError> {
    let raw: RawPrices = serde_json::from_value(raw.clone())?;
    let geo = &raw.dimension.geo.category;

    let mut positions: Vec<(usize, &String)> = geo
        .index
        .iter()
        .map(|(code, position)| (*position, code))
        .collect();
    positions.sort_unstable_by_key(|(position, _)| *position);

    let mut records = Vec::with_capacity(positions.len());
    for (position, code) in positions {
        let label = geo
            .label
            .get(code)
            .ok_or_else(|| AppError::MissingLabel(code.clone()))?;
        let value = raw
            .value
            .get(&position.to_string())
            .copied()
            .ok_or(AppError::MissingValue(position))?;
        records.push(PriceRecord::new(tidy_country(label, rewrites), value));
    }
    Ok(records)
}

/// Apply the first matching rewrite, or pass the label through.
fn tidy_country(label: &str, rewrites: &[LabelRewrite]) -> String {
    for rewrite in rewrites {
        if label.contains(&rewrite.pattern) {
            return rewrite.replacement.clone();
        }
    }
    label.to_string()
}
