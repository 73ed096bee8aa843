use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::errors::AppError;
use crate::eurostat;
use crate::filters;
use crate::models::category::CategorySpec;
use crate::models::prices::PriceRecord;

/// Fetch, filter and persist one price file per configured category.
///
/// Categories the API has nothing usable for are skipped; the remaining
/// categories still run.
pub async fn create_price_files(
    client: &reqwest::Client,
    categories: &[CategorySpec],
    data_dir: &Path,
) -> Result<(), AppError> {
    create_price_files_at(client, eurostat::PRICE_URL, categories, data_dir).await
}

/// As [`create_price_files`], against an explicit endpoint.
pub(crate) async fn create_price_files_at(
    client: &reqwest::Client,
    url: &str,
    categories: &[CategorySpec],
    data_dir: &Path,
) -> Result<(), AppError> {
    for category in categories {
        create_price_file_at(client, url, category, data_dir).await?;
    }
    Ok(())
}

/// Fetch and persist a single category.
///
/// Returns the filtered records, or `None` when the category was skipped.
pub async fn create_price_file(
    client: &reqwest::Client,
    category: &CategorySpec,
    data_dir: &Path,
) -> Result<Option<Vec<PriceRecord>>, AppError> {
    create_price_file_at(client, eurostat::PRICE_URL, category, data_dir).await
}

/// As [`create_price_file`], against an explicit endpoint.
pub(crate) async fn create_price_file_at(
    client: &reqwest::Client,
    url: &str,
    category: &CategorySpec,
    data_dir: &Path,
) -> Result<Option<Vec<PriceRecord>>, AppError> {
    info!("Fetching price levels for {} ({})", category.name, category.code);
    let Some(raw) = eurostat::prices_raw_at(client, url, &category.code).await else {
        warn!("Skipping {}: no payload", category.name);
        return Ok(None);
    };
    let prices = filters::filter_prices(&raw)?;
    write_prices(&category.name, &prices, data_dir)?;
    Ok(Some(prices))
}

/// Overwrite the persisted dataset for one category.
pub fn write_prices(name: &str, prices: &[PriceRecord], data_dir: &Path) -> Result<(), AppError> {
    fs::create_dir_all(data_dir)
        .map_err(|e| AppError::FileWrite(format!("{}: {}", data_dir.display(), e)))?;
    let path = price_file_path(data_dir, name);
    let json = serde_json::to_string_pretty(prices)?;
    fs::write(&path, json).map_err(|e| AppError::FileWrite(format!("{}: {}", path.display(), e)))?;
    info!("Wrote {} countries to {}", prices.len(), path.display());
    Ok(())
}

/// Path of the persisted dataset for one category.
pub fn price_file_path(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join(format!("{}.json", name))
}
