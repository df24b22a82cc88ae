//! Minimal GeoJSON feature model used at the ingest boundary.
//!
//! Geometry coordinates are kept as raw JSON so that malformed vertices can
//! be skipped individually instead of rejecting the whole collection.

use crate::geometry::{exterior_ring, position_from_json, LatLng};
use anyhow::Context;
use geo_types::Coord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

impl FeatureCollection {
    /// Parse a GeoJSON FeatureCollection from text.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("failed to parse GeoJSON feature collection")
    }
}

impl Feature {
    /// Raw property value, if present and not null.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties
            .as_ref()
            .and_then(|p| p.get(key))
            .filter(|v| !v.is_null())
    }

    /// Property rendered as text. Strings are trimmed, numbers and booleans
    /// are printed, anything missing renders as empty text.
    pub fn text(&self, key: &str) -> String {
        match self.property(key) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    /// First non-empty text among several property names.
    pub fn text_any(&self, keys: &[&str]) -> String {
        keys.iter()
            .map(|k| self.text(k))
            .find(|s| !s.is_empty())
            .unwrap_or_default()
    }

    /// Location of a Point feature.
    pub fn point(&self) -> Option<LatLng> {
        let geometry = self.geometry.as_ref()?;
        match geometry.kind.as_str() {
            "Point" => position_from_json(&geometry.coordinates).map(LatLng::from),
            "MultiPoint" => geometry
                .coordinates
                .get(0)
                .and_then(position_from_json)
                .map(LatLng::from),
            _ => None,
        }
    }

    /// Valid vertices of the outer ring of a polygonal feature.
    pub fn outline(&self) -> Vec<Coord<f64>> {
        self.geometry
            .as_ref()
            .map(|g| exterior_ring(&g.kind, &g.coordinates))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_collection_with_mixed_properties() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature",
                 "geometry": {"type": "Point", "coordinates": [-111.5, 40.25]},
                 "properties": {"DatasetName": "  Weber River ", "DatasetInternalID": 1042, "Missing": null}},
                {"type": "Feature", "geometry": null, "properties": null}
            ]
        }"#;
        let fc = FeatureCollection::parse(text).unwrap();
        assert_eq!(fc.features.len(), 2);

        let first = &fc.features[0];
        assert_eq!(first.text("DatasetName"), "Weber River");
        assert_eq!(first.text("DatasetInternalID"), "1042");
        assert_eq!(first.text("Missing"), "");
        assert_eq!(first.text("Absent"), "");
        assert_eq!(first.point(), Some(LatLng::new(40.25, -111.5)));

        let second = &fc.features[1];
        assert_eq!(second.text("DatasetName"), "");
        assert_eq!(second.point(), None);
        assert!(second.outline().is_empty());
    }

    #[test]
    fn text_any_prefers_first_present_key() {
        let text = r#"{"features": [{"properties": {"REGION": "UC", "PCODE": ""}}]}"#;
        let fc = FeatureCollection::parse(text).unwrap();
        let f = &fc.features[0];
        assert_eq!(f.text_any(&["DatasetRegion", "REGION"]), "UC");
        assert_eq!(f.text_any(&["DatasetPCODE", "PCODE"]), "");
    }

    #[test]
    fn parse_rejects_non_json() {
        assert!(FeatureCollection::parse("not json").is_err());
    }

    #[test]
    fn missing_features_member_is_empty() {
        let fc = FeatureCollection::parse(r#"{"type": "FeatureCollection"}"#).unwrap();
        assert!(fc.features.is_empty());
    }
}
