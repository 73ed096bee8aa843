use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error};

/// Eurostat WDDS endpoint for the purchasing power parity dataset.
pub const PRICE_URL: &str = "http://ec.europa.eu/eurostat/wdds/rest/data/v2.1/json/en/prc_ppp_ind";

/// Statistic requested: price level indices relative to EU28 = 100.
const NA_ITEM: &str = "PLI_EU28";

/// Fetch the raw price level payload for a single category code.
///
/// Returns `None` whenever no usable payload exists: connection failures are
/// absorbed silently, API-reported failures are reported on the console.
/// The caller is expected to skip the category on `None`.
pub async fn prices_raw(client: &reqwest::Client, code: &str) -> Option<Value> {
    prices_raw_at(client, PRICE_URL, code).await
}

/// As [`prices_raw`], against an explicit endpoint.
pub(crate) async fn prices_raw_at(
    client: &reqwest::Client,
    url: &str,
    code: &str,
) -> Option<Value> {
    let result = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .query(&[
            ("na_item", NA_ITEM),
            ("lastTimePeriod", "1"),
            ("precision", "1"),
            ("ppp_cat", code),
        ])
        .send()
        .await;

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            debug!("Connection to Eurostat failed for {}: {}", code, e);
            return None;
        }
    };

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        println!("{}", failure_message(status, &body, code));
        return None;
    }

    match response.json::<Value>().await {
        Ok(payload) => Some(payload),
        Err(e) => {
            error!("Eurostat returned a non-JSON body for {}: {}", code, e);
            None
        }
    }
}

/// Console message for a non-success response.
///
/// An empty-dataset reply means the category code is wrong; anything else is
/// a server-side problem the user cannot fix.
fn failure_message(status: StatusCode, body: &str, code: &str) -> String {
    if body.contains("no data") {
        format!("No data returned: {} looks like an invalid category code", code)
    } else {
        format!(
            "Eurostat returned error {} outside of our control, please try again later",
            status.as_u16()
        )
    }
}
