use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

use serde_json::json;
use tracing::info;

use crate::commands::combine::combined_file_path;
use crate::errors::AppError;
use crate::models::prices::{CombinedPrices, OVERALL};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Load the combined mapping written by the combine stage.
pub fn read_combined(data_dir: &Path) -> Result<CombinedPrices, AppError> {
    let path = combined_file_path(data_dir);
    let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            AppError::FileNotFound(format!("{} (run the combine stage first)", path.display()))
        }
        _ => AppError::FileRead(format!("{}: {}", path.display(), e)),
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Build the Plotly choropleth figure JSON for one category.
///
/// The `Exclude` sentinel passes through: no country matches it, so that row
/// simply does not render on the map.
pub fn update_figure(combined: &CombinedPrices, category: &str) -> Result<String, AppError> {
    let records = combined
        .get(category)
        .ok_or_else(|| AppError::UnknownCategory(category.to_string()))?;
    let locations: Vec<&str> = records.iter().map(|r| r.country.as_str()).collect();
    let values: Vec<f64> = records.iter().map(|r| r.value).collect();

    let figure = json!({
        "data": [{
            "type": "choropleth",
            "locationmode": "country names",
            "locations": locations,
            "z": values,
            "colorscale": "Viridis",
            "colorbar": { "title": { "text": "EU28 = 100" } },
        }],
        "layout": {
            "title": { "text": format!("Price levels: {}", title_for(category)) },
            "geo": { "scope": "europe", "fitbounds": "locations" },
            "margin": { "l": 0, "r": 0, "t": 40, "b": 0 },
        },
    });
    Ok(figure.to_string())
}

/// Render the combined data as a self-contained choropleth dashboard.
pub fn write_dashboard(combined: &CombinedPrices, path: &Path) -> Result<(), AppError> {
    let mut html = String::with_capacity(32 * 1024);

    // ── HTML head ──
    write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Cost Abroad</title>
<script src="{}" charset="utf-8"></script>
<style>
body {{ font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif; margin:0 auto; max-width:960px; padding:24px; }}
h1 {{ font-size:1.4rem; margin-bottom:4px; }}
.timestamp {{ color:#777; font-size:0.8rem; margin-bottom:16px; }}
select {{ font-size:1rem; padding:4px 8px; margin-bottom:12px; }}
#map {{ width:100%; height:600px; }}
</style>
</head>
<body>
<h1>Cost Abroad</h1>
<p class="timestamp">Generated: {}</p>
"#,
        PLOTLY_CDN,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )
    .ok();

    // ── Category selector ──
    html.push_str(r#"<select id="category">"#);
    for name in selector_order(combined) {
        let selected = if name == OVERALL { " selected" } else { "" };
        write!(
            html,
            r#"<option value="{}"{}>{}</option>"#,
            escape_html(name),
            selected,
            escape_html(&title_for(name))
        )
        .ok();
    }
    html.push_str("</select>");

    // ── Figures and selector wiring ──
    let mut figures = serde_json::Map::new();
    for name in combined.keys() {
        let figure: serde_json::Value = serde_json::from_str(&update_figure(combined, name)?)?;
        figures.insert(name.clone(), figure);
    }
    // The JSON sits inside a script element, so "<" must not appear verbatim.
    let figures_json = serde_json::Value::Object(figures)
        .to_string()
        .replace('<', "\\u003c");
    write!(
        html,
        r#"<div id="map"></div>
<script>
const figures = {};
const select = document.getElementById("category");
function render() {{
  const figure = figures[select.value];
  Plotly.react("map", figure.data, figure.layout, {{responsive: true}});
}}
select.addEventListener("change", render);
render();
</script>
</body>
</html>
"#,
        figures_json
    )
    .ok();

    fs::write(path, html).map_err(|e| AppError::FileWrite(format!("{}: {}", path.display(), e)))?;
    info!("Wrote dashboard for {} datasets to {}", combined.len(), path.display());
    Ok(())
}

/// Selector entries: "overall" first, then the categories alphabetically.
fn selector_order(combined: &CombinedPrices) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::with_capacity(combined.len());
    if combined.contains_key(OVERALL) {
        names.push(OVERALL);
    }
    names.extend(combined.keys().map(String::as_str).filter(|n| *n != OVERALL));
    names
}

/// Human label for a category key, e.g. "restaurant_hotel" becomes
/// "restaurant hotel".
fn title_for(name: &str) -> String {
    name.replace('_', " ")
}

/// Minimal HTML escaping for names interpolated into markup.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::prices::PriceRecord;

    fn sample_combined() -> CombinedPrices {
        let mut combined = CombinedPrices::new();
        combined.insert(
            "food".to_string(),
            vec![
                PriceRecord::new("Malta", 77.8),
                PriceRecord::new("Exclude", 74.4),
                PriceRecord::new("Poland", 75.3),
            ],
        );
        combined.insert(
            OVERALL.to_string(),
            vec![
                PriceRecord::new("Malta", 77.8),
                PriceRecord::new("Exclude", 74.4),
                PriceRecord::new("Poland", 75.3),
            ],
        );
        combined
    }

    #[test]
    fn test_figure_contains_countries_in_order() {
        let figure = update_figure(&sample_combined(), OVERALL).unwrap();
        assert!(figure.contains(r#""locations":["Malta","Exclude","Poland"]"#));
        assert!(figure.contains(r#""z":[77.8,74.4,75.3]"#));
        assert!(figure.contains("choropleth"));
    }

    #[test]
    fn test_figure_unknown_category_is_an_error() {
        let err = update_figure(&sample_combined(), "housing").unwrap_err();
        assert!(matches!(err, AppError::UnknownCategory(name) if name == "housing"));
    }

    #[test]
    fn test_dashboard_html_lists_every_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.html");
        write_dashboard(&sample_combined(), &path).unwrap();

        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains(PLOTLY_CDN));
        assert!(html.contains(r#"<option value="overall" selected>"#));
        assert!(html.contains(r#"<option value="food">"#));
        assert!(html.contains(r#""locations":["Malta","Exclude","Poland"]"#));
    }

    #[test]
    fn test_selector_puts_overall_first() {
        let combined = sample_combined();
        let order = selector_order(&combined);
        assert_eq!(order, vec![OVERALL, "food"]);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"a"><b"#), "a&quot;&gt;&lt;b");
        assert_eq!(escape_html("restaurant hotel"), "restaurant hotel");
    }

    #[test]
    fn test_dashboard_escapes_hostile_category_names() {
        let mut combined = CombinedPrices::new();
        combined.insert(
            r#"a"><b</script>"#.to_string(),
            vec![PriceRecord::new("Malta", 77.8)],
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.html");
        write_dashboard(&combined, &path).unwrap();

        let html = fs::read_to_string(&path).unwrap();
        // Neither the selector nor the embedded JSON carries the raw name.
        assert!(!html.contains(r#"value="a"><b"#));
        assert!(!html.contains("<b</script>"));
        assert!(html.contains("a&quot;&gt;&lt;b"));
    }

    #[test]
    fn test_read_combined_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_combined(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::FileNotFound(_)));
    }

    #[test]
    fn test_unreadable_combined_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(combined_file_path(dir.path()), [0xFF, 0xFE, 0xFD]).unwrap();
        let err = read_combined(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::FileRead(_)));
    }
}
