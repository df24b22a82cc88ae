//! Partitioning of catalog datasets into typed map layers.

use crate::dataset::Dataset;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Point layers built from the dataset catalog, in legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LayerKind {
    Streamgage,
    Snotel,
    Snowcourse,
    Scan,
    Reservoir,
    Agrimet,
    Ncdc,
    Other,
}

impl LayerKind {
    pub const ALL: [LayerKind; 8] = [
        LayerKind::Streamgage,
        LayerKind::Snotel,
        LayerKind::Snowcourse,
        LayerKind::Scan,
        LayerKind::Reservoir,
        LayerKind::Agrimet,
        LayerKind::Ncdc,
        LayerKind::Other,
    ];

    /// Registry key shared with the map script.
    pub fn key(&self) -> &'static str {
        match self {
            LayerKind::Streamgage => "STREAMGAGE",
            LayerKind::Snotel => "SNOTEL",
            LayerKind::Snowcourse => "SNOWCOURSE",
            LayerKind::Scan => "SCAN",
            LayerKind::Reservoir => "RESERVOIR",
            LayerKind::Agrimet => "AGRIMET",
            LayerKind::Ncdc => "NCDC",
            LayerKind::Other => "OTHER",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        LayerKind::ALL.into_iter().find(|k| k.key() == key)
    }

    /// Marker fill color.
    pub fn marker_color(&self) -> &'static str {
        match self {
            LayerKind::Streamgage => "#23ff27",
            LayerKind::Snotel => "#4cffed",
            LayerKind::Snowcourse => "#00beff",
            LayerKind::Scan => "#ffcc6f",
            LayerKind::Reservoir => "#5263fe",
            LayerKind::Agrimet => "#f47251",
            LayerKind::Ncdc => "#c0c0c0",
            LayerKind::Other => "#808080",
        }
    }

    /// Name shown in the layer control and reported to the host.
    pub fn label(&self) -> &'static str {
        match self {
            LayerKind::Streamgage => "USGS Streamgages",
            LayerKind::Snotel => "NRCS SNOTEL Sites",
            LayerKind::Snowcourse => "NRCS Snow Courses",
            LayerKind::Scan => "NRCS SCAN Sites",
            LayerKind::Reservoir => "USBR Natural Flow",
            LayerKind::Agrimet => "USBR AgriMet",
            LayerKind::Ncdc => "NOAA Sites",
            LayerKind::Other => "Other Datasets",
        }
    }

    /// AgriMet and NOAA sites are dense; they start switched off.
    pub fn visible_by_default(&self) -> bool {
        !matches!(self, LayerKind::Agrimet | LayerKind::Ncdc)
    }
}

/// One rendered layer: indices into the catalog's dataset list.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetLayer {
    pub kind: LayerKind,
    pub members: Vec<usize>,
}

impl DatasetLayer {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Catalog index of the `n`th feature of this layer.
    pub fn dataset_index(&self, n: usize) -> Option<usize> {
        self.members.get(n).copied()
    }

    /// GeoJSON for the map script. Each feature carries its position in
    /// this layer (`idx`) and a `name` for the hover tooltip. Datasets
    /// without a location are left out of the drawing but keep their index.
    pub fn to_geojson(&self, datasets: &[Dataset]) -> Value {
        let features: Vec<Value> = self
            .members
            .iter()
            .enumerate()
            .filter_map(|(idx, &di)| {
                let dataset = datasets.get(di)?;
                let at = dataset.location?;
                Some(json!({
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [at.lng, at.lat]},
                    "properties": {"idx": idx, "name": dataset.name},
                }))
            })
            .collect();
        json!({"type": "FeatureCollection", "features": features})
    }
}

/// All point layers of a loaded catalog, one per [`LayerKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSet {
    layers: Vec<DatasetLayer>,
}

impl LayerSet {
    /// Assign every dataset to exactly one layer by its type tag.
    pub fn partition(datasets: &[Dataset]) -> Self {
        let mut layers: Vec<DatasetLayer> = LayerKind::ALL
            .iter()
            .map(|&kind| DatasetLayer {
                kind,
                members: Vec::new(),
            })
            .collect();
        for (i, dataset) in datasets.iter().enumerate() {
            let kind = dataset.dataset_type.layer_kind();
            // ALL is in declaration order, so the discriminant is the slot
            layers[kind as usize].members.push(i);
        }
        for layer in &layers {
            log::info!(
                "[HydroMap] layers: {} -> {} datasets",
                layer.kind.key(),
                layer.len()
            );
        }
        Self { layers }
    }

    pub fn get(&self, kind: LayerKind) -> &DatasetLayer {
        &self.layers[kind as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &DatasetLayer> {
        self.layers.iter()
    }

    /// Total number of datasets across all layers.
    pub fn total(&self) -> usize {
        self.layers.iter().map(DatasetLayer::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetType;
    use crate::geometry::LatLng;

    fn dataset(tag: &str, name: &str, located: bool) -> Dataset {
        Dataset {
            dataset_type: DatasetType::from_tag(tag),
            agency: String::new(),
            name: name.to_string(),
            external_id: String::new(),
            elevation: String::new(),
            huc8: String::new(),
            region: String::new(),
            pcode: String::new(),
            location: located.then(|| LatLng::new(40.0, -110.0)),
            parameters: Vec::new(),
        }
    }

    #[test]
    fn every_dataset_lands_in_exactly_one_layer() {
        let datasets = vec![
            dataset("STREAMGAGE", "a", true),
            dataset("SNOTEL", "b", true),
            dataset("", "c", true),
            dataset("CANAL", "d", true),
            dataset("RESERVOIR", "e", true),
            dataset("NCDC", "f", true),
            dataset("STREAMGAGE", "g", true),
        ];
        let layers = LayerSet::partition(&datasets);
        assert_eq!(layers.total(), datasets.len());

        for i in 0..datasets.len() {
            let hits = layers.iter().filter(|l| l.members.contains(&i)).count();
            assert_eq!(hits, 1, "dataset {} should be in exactly one layer", i);
        }
        assert_eq!(layers.get(LayerKind::Streamgage).members, vec![0, 6]);
        assert_eq!(layers.get(LayerKind::Other).members, vec![2, 3]);
        assert!(layers.get(LayerKind::Scan).is_empty());
    }

    #[test]
    fn layer_keys_round_trip_and_defaults() {
        for kind in LayerKind::ALL {
            assert_eq!(LayerKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(LayerKind::from_key("WATERSHEDS"), None);
        assert!(LayerKind::Streamgage.visible_by_default());
        assert!(!LayerKind::Agrimet.visible_by_default());
        assert!(!LayerKind::Ncdc.visible_by_default());
        assert_eq!(LayerKind::Streamgage.marker_color(), "#23ff27");
        assert_eq!(LayerKind::Other.marker_color(), "#808080");
    }

    #[test]
    fn geojson_skips_unlocated_but_keeps_indices() {
        let datasets = vec![
            dataset("SNOTEL", "located", true),
            dataset("SNOTEL", "nowhere", false),
            dataset("SNOTEL", "also located", true),
        ];
        let layers = LayerSet::partition(&datasets);
        let fc = layers.get(LayerKind::Snotel).to_geojson(&datasets);
        let features = fc["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[1]["properties"]["idx"], 2);
        assert_eq!(features[1]["properties"]["name"], "also located");
        assert_eq!(features[0]["geometry"]["coordinates"][0], -110.0);
    }
}
