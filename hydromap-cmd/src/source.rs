//! Reading catalog and area GeoJSON from disk or over http(s).

use anyhow::Context;
use hydromap_catalog::Catalog;
use hydromap_db::Database;
use log::info;

pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Read a GeoJSON source as text.
pub async fn read_source(source: &str) -> anyhow::Result<String> {
    if !is_url(source) {
        return tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("failed to read {}", source));
    }

    info!("Fetching {}", source);
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()?;
    let response = client
        .get(source)
        .send()
        .await
        .with_context(|| format!("failed to fetch {}", source))?;
    if !response.status().is_success() {
        anyhow::bail!("bad response for {}: {}", source, response.status());
    }
    Ok(response.text().await?)
}

/// Load a catalog and index it in a fresh database.
pub async fn load_catalog(source: &str) -> anyhow::Result<(Catalog, Database)> {
    let text = read_source(source).await?;
    let catalog = Catalog::from_geojson(&text)
        .with_context(|| format!("failed to parse catalog {}", source))?;
    let db = Database::new()?;
    db.load_catalog(&catalog)?;
    Ok((catalog, db))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_urls() {
        assert!(is_url("https://example.org/catalog.geojson"));
        assert!(is_url("http://localhost:8000/catalog.geojson"));
        assert!(!is_url("fixtures/catalog.geojson"));
        assert!(!is_url("/tmp/http_catalog.geojson"));
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let err = read_source("/nonexistent/catalog.geojson").await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/catalog.geojson"));
    }
}
