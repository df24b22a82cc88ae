//! Watershed and climate-division polygons, and the per-watershed catalog
//! of selectable datasets.

use crate::dataset::{normalize_huc8, Dataset};
use crate::feature::FeatureCollection;
use crate::geometry::{center_or, LatLng};
use geo_types::Coord;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Ids of the gridded-climate pseudo-datasets offered for every watershed.
pub const PRISM_ID: &str = "PRISM";
pub const PRISM_NAME: &str = "PRISM Temperature & Precipitation";
pub const PRISM_COLOR: &str = "#c49a6c";
pub const NRCC_ID: &str = "NRCC";
pub const NRCC_NAME: &str = "NRCC Temperature & Precipitation";
pub const NRCC_COLOR: &str = "#8c6bb1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaKind {
    Watershed,
    ClimateDivision,
}

impl AreaKind {
    /// Property holding the area's code.
    fn code_property(&self) -> &'static str {
        match self {
            AreaKind::Watershed => "HUC8",
            AreaKind::ClimateDivision => "CLIMDIV",
        }
    }
}

/// A watershed (HUC8) or climate-division polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaFeature {
    pub kind: AreaKind,
    pub code: String,
    pub name: String,
    /// Valid vertices of the outer ring, used for popup placement.
    pub outline: Vec<Coord<f64>>,
    /// Source geometry, passed through untouched for drawing.
    pub geometry: Value,
}

impl AreaFeature {
    /// Popup anchor: vertex mean of the outline, else the pointer.
    pub fn popup_anchor(&self, pointer: LatLng) -> LatLng {
        center_or(&self.outline, pointer)
    }
}

/// Read every polygon of an area collection, in source order.
pub fn load_areas(collection: &FeatureCollection, kind: AreaKind) -> Vec<AreaFeature> {
    let areas: Vec<AreaFeature> = collection
        .features
        .iter()
        .map(|f| {
            let code = f.text(kind.code_property());
            AreaFeature {
                kind,
                code: match kind {
                    AreaKind::Watershed => normalize_huc8(&code),
                    AreaKind::ClimateDivision => code,
                },
                name: f.text("NAME"),
                outline: f.outline(),
                geometry: f
                    .geometry
                    .as_ref()
                    .and_then(|g| serde_json::to_value(g).ok())
                    .unwrap_or(Value::Null),
            }
        })
        .collect();
    log::info!("[HydroMap] areas: loaded {} {:?} polygons", areas.len(), kind);
    areas
}

/// GeoJSON for the map script; `idx` is the polygon's position in `areas`.
pub fn areas_to_geojson(areas: &[AreaFeature]) -> Value {
    let features: Vec<Value> = areas
        .iter()
        .enumerate()
        .map(|(idx, a)| {
            json!({
                "type": "Feature",
                "geometry": a.geometry,
                "properties": {"idx": idx, "name": a.name, "code": a.code},
            })
        })
        .collect();
    json!({"type": "FeatureCollection", "features": features})
}

/// One selectable dataset inside a watershed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl CatalogItem {
    pub fn prism() -> Self {
        Self {
            id: PRISM_ID.to_string(),
            name: PRISM_NAME.to_string(),
            color: PRISM_COLOR.to_string(),
        }
    }

    pub fn nrcc() -> Self {
        Self {
            id: NRCC_ID.to_string(),
            name: NRCC_NAME.to_string(),
            color: NRCC_COLOR.to_string(),
        }
    }

    pub fn is_prism(&self) -> bool {
        self.id == PRISM_ID
    }

    /// PRISM or NRCC: requested per watershed rather than by catalog id.
    pub fn is_gridded(&self) -> bool {
        self.id == PRISM_ID || self.id == NRCC_ID
    }
}

/// Selectable datasets of one watershed, PRISM and NRCC first.
///
/// Items are stored as whole records so the id, name and color of an
/// entry can never drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatershedEntry {
    pub huc8: String,
    items: Vec<CatalogItem>,
}

impl WatershedEntry {
    pub fn new(huc8: &str) -> Self {
        Self {
            huc8: huc8.to_string(),
            items: vec![CatalogItem::prism(), CatalogItem::nrcc()],
        }
    }

    pub fn push(&mut self, item: CatalogItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.id.as_str()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.name.as_str()).collect()
    }

    pub fn colors(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.color.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Watershed entries keyed by HUC8.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatershedCatalog {
    entries: BTreeMap<String, WatershedEntry>,
}

impl WatershedCatalog {
    /// One item per dataset parameter, grouped by the dataset's HUC8.
    pub fn build(datasets: &[Dataset]) -> Self {
        let mut entries: BTreeMap<String, WatershedEntry> = BTreeMap::new();
        for dataset in datasets.iter().filter(|d| !d.huc8.is_empty()) {
            let color = dataset.dataset_type.layer_kind().marker_color();
            let entry = entries
                .entry(dataset.huc8.clone())
                .or_insert_with(|| WatershedEntry::new(&dataset.huc8));
            for series in &dataset.parameters {
                let name = if series.parameter.is_empty() {
                    dataset.name.clone()
                } else {
                    format!("{}: {}", dataset.name, series.parameter)
                };
                entry.push(CatalogItem {
                    id: series.internal_id.clone(),
                    name,
                    color: color.to_string(),
                });
            }
        }
        log::info!(
            "[HydroMap] watersheds: built catalog entries for {} HUC8 codes",
            entries.len()
        );
        Self { entries }
    }

    /// Entry for a watershed. Watersheds with no catalog datasets still
    /// offer the gridded items.
    pub fn entry(&self, huc8: &str) -> WatershedEntry {
        self.entries
            .get(huc8)
            .cloned()
            .unwrap_or_else(|| WatershedEntry::new(huc8))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    const WATERSHEDS: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"HUC8": 9010001, "NAME": "Souris"},
         "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [0, 10], [10, 10], [10, 0]]]}},
        {"type": "Feature", "properties": {"HUC8": "14060008", "NAME": "Lower Green"},
         "geometry": {"type": "Polygon", "coordinates": [[["bad", "data"]]]}}
    ]}"#;

    fn catalog_datasets() -> Vec<Dataset> {
        let text = r#"{"features": [
            {"geometry": {"type": "Point", "coordinates": [-110.1, 39.0]},
             "properties": {"DatasetType": "STREAMGAGE", "DatasetName": "Green River",
                            "DatasetInternalID": "100", "DatasetParameter": "Streamflow",
                            "DatasetHUC8": "14060008"}},
            {"geometry": {"type": "Point", "coordinates": [-110.2, 39.1]},
             "properties": {"DatasetType": "SNOTEL", "DatasetName": "Pine Creek",
                            "DatasetInternalID": "200|201", "DatasetParameter": "SWE|Precip",
                            "DatasetHUC8": "14060008"}},
            {"geometry": {"type": "Point", "coordinates": [-100.0, 48.0]},
             "properties": {"DatasetType": "SNOTEL", "DatasetName": "No HUC",
                            "DatasetInternalID": "300"}}
        ]}"#;
        FeatureCollection::parse(text)
            .unwrap()
            .features
            .iter()
            .map(Dataset::from_feature)
            .collect()
    }

    #[test]
    fn load_watersheds_pads_codes_and_keeps_order() {
        let fc = FeatureCollection::parse(WATERSHEDS).unwrap();
        let areas = load_areas(&fc, AreaKind::Watershed);
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].code, "09010001");
        assert_eq!(areas[0].name, "Souris");
        assert_eq!(areas[1].code, "14060008");

        let pointer = LatLng::new(39.0, -110.0);
        assert_eq!(areas[0].popup_anchor(pointer), LatLng::new(5.0, 5.0));
        assert_eq!(areas[1].popup_anchor(pointer), pointer);

        let fc = areas_to_geojson(&areas);
        assert_eq!(fc["features"][1]["properties"]["idx"], 1);
        assert_eq!(fc["features"][1]["properties"]["code"], "14060008");
        assert_eq!(fc["features"][0]["geometry"]["type"], "Polygon");
    }

    #[test]
    fn climate_division_codes_are_kept_verbatim() {
        let text = r#"{"features": [{"properties": {"CLIMDIV": 1005, "NAME": "NORTHEAST"},
            "geometry": {"type": "Polygon", "coordinates": [[[1, 1], [1, 3], [3, 3], [3, 1]]]}}]}"#;
        let fc = FeatureCollection::parse(text).unwrap();
        let areas = load_areas(&fc, AreaKind::ClimateDivision);
        assert_eq!(areas[0].code, "1005");
        assert_eq!(areas[0].kind, AreaKind::ClimateDivision);
    }

    #[test]
    fn entries_are_seeded_with_gridded_items_and_stay_parallel() {
        let catalog = WatershedCatalog::build(&catalog_datasets());
        assert_eq!(catalog.len(), 1);

        let entry = catalog.entry("14060008");
        assert_eq!(entry.ids(), vec!["PRISM", "NRCC", "100", "200", "201"]);
        assert_eq!(
            entry.names(),
            vec![
                PRISM_NAME,
                NRCC_NAME,
                "Green River: Streamflow",
                "Pine Creek: SWE",
                "Pine Creek: Precip"
            ]
        );
        assert_eq!(entry.colors().len(), entry.ids().len());
        assert_eq!(entry.names().len(), entry.ids().len());
        assert_eq!(entry.colors()[2], "#23ff27");
        assert!(entry.items()[0].is_prism());
        assert!(entry.items()[1].is_gridded());
        assert!(!entry.items()[1].is_prism());
        assert!(!entry.items()[2].is_gridded());
    }

    #[test]
    fn unknown_watershed_still_offers_gridded_items() {
        let catalog = WatershedCatalog::build(&catalog_datasets());
        let entry = catalog.entry("17040212");
        assert_eq!(entry.huc8, "17040212");
        assert_eq!(entry.ids(), vec![PRISM_ID, NRCC_ID]);
        assert_eq!(entry.colors(), vec![PRISM_COLOR, NRCC_COLOR]);
    }
}
