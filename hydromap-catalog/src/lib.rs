//! Core types and GeoJSON ingest for the HydroMap dataset catalog.
//!
//! The catalog is one point FeatureCollection whose features are tagged by
//! a `DatasetType` property. Loading it:
//! 1. parses every feature into a [`dataset::Dataset`], splitting the
//!    `|`-delimited parameter fields once;
//! 2. partitions the datasets into one [`layer::DatasetLayer`] per type;
//! 3. groups dataset parameters by HUC8 into the
//!    [`watershed::WatershedCatalog`].

pub mod dataset;
pub mod feature;
pub mod geometry;
pub mod layer;
pub mod watershed;

use dataset::Dataset;
use feature::FeatureCollection;
use layer::{LayerKind, LayerSet};
use watershed::WatershedCatalog;

/// A loaded dataset catalog. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    datasets: Vec<Dataset>,
    layers: LayerSet,
    watersheds: WatershedCatalog,
}

impl Catalog {
    /// Build the catalog from an already-parsed collection.
    pub fn from_collection(collection: &FeatureCollection) -> Self {
        let datasets: Vec<Dataset> = collection
            .features
            .iter()
            .map(Dataset::from_feature)
            .collect();
        let layers = LayerSet::partition(&datasets);
        let watersheds = WatershedCatalog::build(&datasets);
        log::info!("[HydroMap] catalog: loaded {} datasets", datasets.len());
        Self {
            datasets,
            layers,
            watersheds,
        }
    }

    /// Parse GeoJSON text and build the catalog.
    pub fn from_geojson(text: &str) -> anyhow::Result<Self> {
        let collection = FeatureCollection::parse(text)?;
        Ok(Self::from_collection(&collection))
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn layers(&self) -> &LayerSet {
        &self.layers
    }

    pub fn watersheds(&self) -> &WatershedCatalog {
        &self.watersheds
    }

    /// Dataset behind the `n`th feature of a layer.
    pub fn dataset_in_layer(&self, kind: LayerKind, n: usize) -> Option<&Dataset> {
        self.layers
            .get(kind)
            .dataset_index(n)
            .and_then(|i| self.datasets.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_from_geojson() {
        let text = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-111.8, 40.7]},
             "properties": {"DatasetType": "STREAMGAGE", "DatasetName": "Jordan River",
                            "DatasetExternalID": "10167000", "DatasetInternalID": "11",
                            "DatasetParameter": "Streamflow", "DatasetHUC8": "16020204"}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-111.6, 40.6]},
             "properties": {"DatasetType": "SNOTEL", "DatasetName": "Brighton",
                            "DatasetExternalID": "366", "DatasetInternalID": "12",
                            "DatasetParameter": "SWE", "DatasetHUC8": "16020204"}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-111.0, 40.0]},
             "properties": {"DatasetName": "Untyped"}}
        ]}"#;
        let catalog = Catalog::from_geojson(text).unwrap();
        assert_eq!(catalog.datasets().len(), 3);
        assert_eq!(catalog.layers().total(), 3);

        let gage = catalog.dataset_in_layer(LayerKind::Streamgage, 0).unwrap();
        assert_eq!(gage.external_id, "10167000");
        let untyped = catalog.dataset_in_layer(LayerKind::Other, 0).unwrap();
        assert_eq!(untyped.name, "Untyped");
        assert!(catalog.dataset_in_layer(LayerKind::Streamgage, 1).is_none());

        assert_eq!(catalog.watersheds().entry("16020204").len(), 4);
    }

    #[test]
    fn catalog_rejects_malformed_text() {
        assert!(Catalog::from_geojson("{\"features\": 5}").is_err());
    }
}
