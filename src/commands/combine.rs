use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::commands::create::price_file_path;
use crate::errors::AppError;
use crate::models::category::CategorySpec;
use crate::models::prices::{CombinedPrices, PriceRecord, OVERALL};

/// Combine every persisted category file into one mapping with a synthetic
/// "overall" dataset, persist it, and return it.
pub fn create_combined_file(
    categories: &[CategorySpec],
    data_dir: &Path,
) -> Result<CombinedPrices, AppError> {
    let mut datasets: Vec<(&str, Vec<PriceRecord>)> = Vec::with_capacity(categories.len());
    for category in categories {
        let prices = read_prices(&category.name, data_dir)?;
        datasets.push((category.name.as_str(), prices));
    }

    let overall = overall_average(&datasets)?;

    let mut combined = CombinedPrices::new();
    for (name, prices) in datasets {
        combined.insert(name.to_string(), prices);
    }
    combined.insert(OVERALL.to_string(), overall);

    combined_write(&combined, data_dir)?;
    Ok(combined)
}

/// Load one persisted category dataset.
pub fn read_prices(name: &str, data_dir: &Path) -> Result<Vec<PriceRecord>, AppError> {
    let path = price_file_path(data_dir, name);
    let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            AppError::FileNotFound(format!("{} (run the create stage first)", path.display()))
        }
        _ => AppError::FileRead(format!("{}: {}", path.display(), e)),
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Persist the combined mapping.
pub fn combined_write(combined: &CombinedPrices, data_dir: &Path) -> Result<(), AppError> {
    fs::create_dir_all(data_dir)
        .map_err(|e| AppError::FileWrite(format!("{}: {}", data_dir.display(), e)))?;
    let path = combined_file_path(data_dir);
    let json = serde_json::to_string_pretty(combined)?;
    fs::write(&path, json).map_err(|e| AppError::FileWrite(format!("{}: {}", path.display(), e)))?;
    info!("Wrote {} datasets to {}", combined.len(), path.display());
    Ok(())
}

/// Path of the persisted combined mapping.
pub fn combined_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join("combined.json")
}

/// Element-wise mean across datasets, rounded to one decimal place.
///
/// Alignment is positional: every dataset must list the same countries in the
/// same order, and the first dataset defines the ordering of the result.
fn overall_average(datasets: &[(&str, Vec<PriceRecord>)]) -> Result<Vec<PriceRecord>, AppError> {
    let (_, first) = datasets.first().ok_or(AppError::NothingToCombine)?;

    for (name, prices) in &datasets[1..] {
        if prices.len() != first.len() {
            return Err(AppError::DatasetMismatch {
                category: name.to_string(),
                detail: format!("{} countries, expected {}", prices.len(), first.len()),
            });
        }
        for (position, (record, expected)) in prices.iter().zip(first.iter()).enumerate() {
            if record.country != expected.country {
                return Err(AppError::DatasetMismatch {
                    category: name.to_string(),
                    detail: format!(
                        "position {} is {}, expected {}",
                        position, record.country, expected.country
                    ),
                });
            }
        }
    }

    let count = datasets.len() as f64;
    let overall = first
        .iter()
        .enumerate()
        .map(|(position, record)| {
            let sum: f64 = datasets.iter().map(|(_, prices)| prices[position].value).sum();
            PriceRecord::new(record.country.clone(), round1(sum / count))
        })
        .collect();
    Ok(overall)
}

/// Round to one decimal place, the precision requested from the API.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
