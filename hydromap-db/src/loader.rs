//! Loading functions for populating the in-memory SQLite database.
//!
//! Rows are derived from already-parsed catalog types, so the `|`-delimited
//! parameter fields are never split here.

use crate::Database;
use hydromap_catalog::watershed::{AreaFeature, AreaKind};
use hydromap_catalog::Catalog;
use rusqlite::params;

impl Database {
    /// Load every selectable parameter of the catalog.
    ///
    /// One row per [`hydromap_catalog::dataset::ParameterSeries`]. Series
    /// without an internal id cannot be selected by the host and are skipped.
    pub fn load_catalog(&self, catalog: &Catalog) -> anyhow::Result<()> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;

        let mut count = 0u32;
        let mut skipped = 0u32;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO datasets (internal_id, external_id, name, agency,
                     dataset_type, parameter, huc8, latitude, longitude, por_start, por_end)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for dataset in catalog.datasets() {
                let lat = dataset.location.map(|p| p.lat);
                let lng = dataset.location.map(|p| p.lng);
                for series in &dataset.parameters {
                    if series.internal_id.is_empty() {
                        skipped += 1;
                        continue;
                    }
                    stmt.execute(params![
                        series.internal_id,
                        dataset.external_id,
                        dataset.name,
                        dataset.agency,
                        dataset.dataset_type.tag(),
                        series.parameter,
                        dataset.huc8,
                        lat,
                        lng,
                        series.por_start,
                        series.por_end,
                    ])?;
                    count += 1;
                }
            }
        }
        tx.commit()?;
        log::info!(
            "[HydroMap] loader: Loaded {} dataset parameters ({} skipped without internal id)",
            count,
            skipped
        );
        Ok(())
    }

    /// Load watershed names. Climate divisions and codeless polygons are ignored.
    pub fn load_watersheds(&self, areas: &[AreaFeature]) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut count = 0u32;
        for area in areas
            .iter()
            .filter(|a| a.kind == AreaKind::Watershed && !a.code.is_empty())
        {
            conn.execute(
                "INSERT OR REPLACE INTO watersheds (huc8, name) VALUES (?1, ?2)",
                params![area.code, area.name],
            )?;
            count += 1;
        }
        log::info!("[HydroMap] loader: Loaded {} watersheds", count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;
    use hydromap_catalog::feature::FeatureCollection;
    use hydromap_catalog::watershed::{load_areas, AreaKind};
    use hydromap_catalog::Catalog;

    fn row_count(db: &Database, table: &str) -> i64 {
        db.conn
            .borrow()
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })
            .unwrap()
    }

    #[test]
    fn load_catalog_one_row_per_parameter() {
        let db = Database::new().unwrap();
        let catalog = Catalog::from_geojson(
            r#"{"features": [
                {"properties": {"DatasetType": "SNOTEL", "DatasetInternalID": "A|B",
                                "DatasetParameter": "SWE|Precip"}},
                {"properties": {"DatasetType": "STREAMGAGE", "DatasetInternalID": "C"}},
                {"properties": {"DatasetType": "SCAN"}}
            ]}"#,
        )
        .unwrap();
        db.load_catalog(&catalog).unwrap();
        assert_eq!(row_count(&db, "datasets"), 3, "Empty internal ids are skipped");
    }

    #[test]
    fn load_catalog_twice_replaces_rows() {
        let db = Database::new().unwrap();
        let catalog = Catalog::from_geojson(
            r#"{"features": [{"properties": {"DatasetType": "SNOTEL", "DatasetInternalID": "A"}}]}"#,
        )
        .unwrap();
        db.load_catalog(&catalog).unwrap();
        db.load_catalog(&catalog).unwrap();
        assert_eq!(row_count(&db, "datasets"), 1);
    }

    #[test]
    fn load_watersheds_ignores_climate_divisions() {
        let db = Database::new().unwrap();
        let fc = FeatureCollection::parse(
            r#"{"features": [
                {"properties": {"HUC8": "16020204", "NAME": "Jordan"}},
                {"properties": {"NAME": "No code"}}
            ]}"#,
        )
        .unwrap();
        db.load_watersheds(&load_areas(&fc, AreaKind::Watershed))
            .unwrap();

        let fc = FeatureCollection::parse(
            r#"{"features": [{"properties": {"CLIMDIV": "4201", "NAME": "Western"}}]}"#,
        )
        .unwrap();
        db.load_watersheds(&load_areas(&fc, AreaKind::ClimateDivision))
            .unwrap();

        assert_eq!(row_count(&db, "watersheds"), 1);
    }
}
