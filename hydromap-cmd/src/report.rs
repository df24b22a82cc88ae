//! Catalog summaries.

use crate::source::{load_catalog, read_source};
use hydromap_catalog::dataset::{normalize_huc8, DatasetType};
use hydromap_catalog::feature::FeatureCollection;
use hydromap_catalog::watershed::{load_areas, AreaKind};
use hydromap_db::Database;
use log::info;

/// Write `layer,sites,parameters` rows for every non-empty layer.
pub async fn run_summary(catalog_src: &str) -> anyhow::Result<()> {
    let (catalog, db) = load_catalog(catalog_src).await?;
    let counts = db.query_layer_counts()?;
    info!(
        "{} sites, {} selectable parameters, {} watersheds",
        catalog.datasets().len(),
        counts.iter().map(|c| c.count).sum::<i64>(),
        catalog.watersheds().len()
    );

    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(["layer", "sites", "parameters"])?;
    for layer in catalog.layers().iter().filter(|l| !l.is_empty()) {
        let parameters = counts
            .iter()
            .filter(|c| DatasetType::from_tag(&c.dataset_type).layer_kind() == layer.kind)
            .map(|c| c.count)
            .sum::<i64>();
        writer.write_record([
            layer.kind.label().to_string(),
            layer.len().to_string(),
            parameters.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the checklist a watershed popup offers: PRISM and NRCC first, then one row
/// per dataset parameter in the watershed.
pub async fn run_watershed(
    catalog_src: &str,
    huc8: &str,
    watersheds_src: Option<&str>,
) -> anyhow::Result<()> {
    let (catalog, db) = load_catalog(catalog_src).await?;
    let huc8 = normalize_huc8(huc8);

    if let Some(src) = watersheds_src {
        index_watersheds(&db, &read_source(src).await?)?;
    }
    match db.query_watershed_name(&huc8)? {
        Some(name) => info!("Watershed {} ({})", name, huc8),
        None => info!("Watershed {}", huc8),
    }

    let entry = catalog.watersheds().entry(&huc8);
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for item in entry.items() {
        writer.serialize(item)?;
    }
    writer.flush()?;
    Ok(())
}

/// Index the watershed polygons of a GeoJSON text. Returns the polygon count.
fn index_watersheds(db: &Database, text: &str) -> anyhow::Result<usize> {
    let areas = load_areas(&FeatureCollection::parse(text)?, AreaKind::Watershed);
    db.load_watersheds(&areas)?;
    Ok(areas.len())
}

/// Write `huc8,name,dataset_count` for every watershed polygon.
pub async fn run_watersheds(catalog_src: &str, watersheds_src: &str) -> anyhow::Result<()> {
    let (_, db) = load_catalog(catalog_src).await?;
    let polygons = index_watersheds(&db, &read_source(watersheds_src).await?)?;
    let rows = db.query_watersheds()?;
    info!("{} watershed polygons, {} distinct HUC8 codes", polygons, rows.len());

    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydromap_catalog::Catalog;

    const WATERSHEDS: &str = r#"{"features": [
        {"properties": {"HUC8": "16020204", "NAME": "Jordan"},
         "geometry": {"type": "Polygon", "coordinates": [[[-112.2, 40.2], [-112.2, 41.0], [-111.6, 41.0]]]}},
        {"properties": {"HUC8": 9010001, "NAME": "Souris"},
         "geometry": {"type": "Polygon", "coordinates": [[[-102, 48], [-102, 49], [-101, 49]]]}}
    ]}"#;

    #[test]
    fn indexed_watersheds_carry_dataset_counts() {
        let db = Database::new().unwrap();
        let catalog = Catalog::from_geojson(
            r#"{"features": [
                {"properties": {"DatasetType": "SNOTEL", "DatasetInternalID": "1|2",
                                "DatasetParameter": "SWE|Precipitation", "DatasetHUC8": "16020204"}}
            ]}"#,
        )
        .unwrap();
        db.load_catalog(&catalog).unwrap();

        assert_eq!(index_watersheds(&db, WATERSHEDS).unwrap(), 2);
        let rows = db.query_watersheds().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].huc8, "09010001");
        assert_eq!(rows[0].dataset_count, 0);
        assert_eq!(rows[1].name, "Jordan");
        assert_eq!(rows[1].dataset_count, 2);
    }

    #[test]
    fn malformed_watersheds_are_an_error() {
        let db = Database::new().unwrap();
        assert!(index_watersheds(&db, "{\"features\": 5}").is_err());
    }
}
