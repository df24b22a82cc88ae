//! Typed query methods for area searches over the catalog.
//!
//! All queries return typed structs from [`crate::models`] that can be
//! serialized to JSON for the host application.

use crate::models::{DatasetRow, LayerCount, WatershedInfo};
use crate::Database;
use hydromap_catalog::geometry::BoundingBox;
use rusqlite::{params, params_from_iter, Row};

const DATASET_COLUMNS: &str = "internal_id, external_id, name, agency, dataset_type, parameter,
     huc8, latitude, longitude, por_start, por_end";

fn dataset_row(row: &Row<'_>) -> rusqlite::Result<DatasetRow> {
    Ok(DatasetRow {
        internal_id: row.get(0)?,
        external_id: row.get(1)?,
        name: row.get(2)?,
        agency: row.get(3)?,
        dataset_type: row.get(4)?,
        parameter: row.get(5)?,
        huc8: row.get(6)?,
        latitude: row.get(7)?,
        longitude: row.get(8)?,
        por_start: row.get(9)?,
        por_end: row.get(10)?,
    })
}

impl Database {
    /// Datasets located inside a bounding box (edges inclusive).
    ///
    /// Datasets without a location never match. Ordered by type, then name,
    /// then internal id.
    pub fn query_datasets_in_bounds(&self, bbox: &BoundingBox) -> anyhow::Result<Vec<DatasetRow>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM datasets
             WHERE latitude BETWEEN ?1 AND ?2 AND longitude BETWEEN ?3 AND ?4
             ORDER BY dataset_type, name, internal_id",
            DATASET_COLUMNS
        ))?;
        let rows = stmt
            .query_map(
                params![bbox.south, bbox.north, bbox.west, bbox.east],
                dataset_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[HydroMap] query: query_datasets_in_bounds returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Datasets whose HUC8 is one of `huc8s`. An empty list matches nothing.
    pub fn query_datasets_in_watersheds(&self, huc8s: &[String]) -> anyhow::Result<Vec<DatasetRow>> {
        if huc8s.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; huc8s.len()].join(", ");
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM datasets
             WHERE huc8 IN ({})
             ORDER BY dataset_type, name, internal_id",
            DATASET_COLUMNS, placeholders
        ))?;
        let rows = stmt
            .query_map(params_from_iter(huc8s.iter()), dataset_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[HydroMap] query: query_datasets_in_watersheds({} codes) returned {} records",
            huc8s.len(),
            rows.len()
        );
        Ok(rows)
    }

    /// Number of selectable parameters per dataset type, largest first.
    pub fn query_layer_counts(&self) -> anyhow::Result<Vec<LayerCount>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT dataset_type, COUNT(*) AS n FROM datasets
             GROUP BY dataset_type
             ORDER BY n DESC, dataset_type",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(LayerCount {
                    dataset_type: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// All loaded watersheds with their dataset counts, ordered by HUC8.
    pub fn query_watersheds(&self) -> anyhow::Result<Vec<WatershedInfo>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT w.huc8, w.name, COUNT(d.internal_id)
             FROM watersheds w LEFT JOIN datasets d ON d.huc8 = w.huc8
             GROUP BY w.huc8, w.name
             ORDER BY w.huc8",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(WatershedInfo {
                    huc8: row.get(0)?,
                    name: row.get(1)?,
                    dataset_count: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[HydroMap] query: query_watersheds returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Name of one watershed, if it was loaded.
    pub fn query_watershed_name(&self, huc8: &str) -> anyhow::Result<Option<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare("SELECT name FROM watersheds WHERE huc8 = ?1")?;
        let mut names = stmt
            .query_map(params![huc8], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names.pop())
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;
    use hydromap_catalog::feature::FeatureCollection;
    use hydromap_catalog::geometry::BoundingBox;
    use hydromap_catalog::watershed::{load_areas, AreaKind};
    use hydromap_catalog::Catalog;

    /// Helper to create a database with a small Utah catalog.
    fn sample_db() -> Database {
        let db = Database::new().unwrap();

        let catalog = Catalog::from_geojson(
            r#"{"features": [
                {"geometry": {"type": "Point", "coordinates": [-111.92, 40.73]},
                 "properties": {"DatasetType": "STREAMGAGE", "DatasetAgency": "USGS",
                                "DatasetName": "Jordan River at 1700 South",
                                "DatasetExternalID": "10171000", "DatasetInternalID": "101",
                                "DatasetParameter": "Streamflow", "DatasetHUC8": "16020204",
                                "DatasetPORStart": "1942-10-01", "DatasetPOREnd": "2019-09-30"}},
                {"geometry": {"type": "Point", "coordinates": [-111.58, 40.60]},
                 "properties": {"DatasetType": "SNOTEL", "DatasetAgency": "NRCS",
                                "DatasetName": "Brighton", "DatasetExternalID": "366",
                                "DatasetInternalID": "201|202", "DatasetParameter": "SWE|Precip",
                                "DatasetHUC8": "16020204"}},
                {"geometry": {"type": "Point", "coordinates": [-109.42, 40.91]},
                 "properties": {"DatasetType": "RESERVOIR", "DatasetAgency": "USBR",
                                "DatasetName": "Flaming Gorge", "DatasetExternalID": "FLGU1",
                                "DatasetInternalID": "301", "DatasetParameter": "Inflow",
                                "DatasetHUC8": "14040106"}},
                {"properties": {"DatasetType": "SNOTEL", "DatasetName": "Unlocated",
                                "DatasetInternalID": "401", "DatasetHUC8": "14040106"}}
            ]}"#,
        )
        .unwrap();
        db.load_catalog(&catalog).unwrap();

        let watersheds = FeatureCollection::parse(
            r#"{"features": [
                {"properties": {"HUC8": "16020204", "NAME": "Jordan"}},
                {"properties": {"HUC8": "14040106", "NAME": "Upper Green-Flaming Gorge Reservoir"}},
                {"properties": {"HUC8": 9010001, "NAME": "Souris"}}
            ]}"#,
        )
        .unwrap();
        db.load_watersheds(&load_areas(&watersheds, AreaKind::Watershed))
            .unwrap();

        db
    }

    #[test]
    fn bounds_query_finds_located_datasets_only() {
        let db = sample_db();
        let wasatch = BoundingBox {
            north: 41.0,
            west: -112.0,
            south: 40.5,
            east: -111.5,
        };
        let rows = db.query_datasets_in_bounds(&wasatch).unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.internal_id.as_str()).collect();
        assert_eq!(ids, vec!["201", "202", "101"], "Ordered by type then name");
        assert_eq!(rows[2].latitude, Some(40.73));
        assert_eq!(rows[2].por_start.as_deref(), Some("1942-10-01"));
    }

    #[test]
    fn bounds_query_edges_are_inclusive() {
        let db = sample_db();
        let point_box = BoundingBox {
            north: 40.91,
            west: -109.42,
            south: 40.91,
            east: -109.42,
        };
        let rows = db.query_datasets_in_bounds(&point_box).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Flaming Gorge");
    }

    #[test]
    fn watershed_query_includes_unlocated_datasets() {
        let db = sample_db();
        let rows = db
            .query_datasets_in_watersheds(&["14040106".to_string()])
            .unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Flaming Gorge", "Unlocated"]);
        assert_eq!(rows[1].latitude, None);
    }

    #[test]
    fn watershed_query_multiple_and_empty() {
        let db = sample_db();
        let both = vec!["16020204".to_string(), "14040106".to_string()];
        assert_eq!(db.query_datasets_in_watersheds(&both).unwrap().len(), 5);
        assert!(db.query_datasets_in_watersheds(&[]).unwrap().is_empty());
        assert!(db
            .query_datasets_in_watersheds(&["00000000".to_string()])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn layer_counts_group_by_type() {
        let db = sample_db();
        let counts = db.query_layer_counts().unwrap();
        assert_eq!(counts[0].dataset_type, "SNOTEL");
        assert_eq!(counts[0].count, 3);
        let total: i64 = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn watersheds_list_counts_datasets() {
        let db = sample_db();
        let sheds = db.query_watersheds().unwrap();
        assert_eq!(sheds.len(), 3);
        assert_eq!(sheds[0].huc8, "09010001");
        assert_eq!(sheds[0].dataset_count, 0);
        assert_eq!(sheds[1].huc8, "14040106");
        assert_eq!(sheds[1].dataset_count, 2);
        assert_eq!(sheds[2].dataset_count, 3);
    }

    #[test]
    fn watershed_name_lookup() {
        let db = sample_db();
        assert_eq!(
            db.query_watershed_name("16020204").unwrap().as_deref(),
            Some("Jordan")
        );
        assert_eq!(db.query_watershed_name("99999999").unwrap(), None);
    }
}
