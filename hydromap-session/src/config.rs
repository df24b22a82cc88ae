//! Widget configuration supplied by the host.

use anyhow::Context;
use hydromap_catalog::geometry::LatLng;
use serde::{Deserialize, Serialize};

/// Which message a site popup's "Add" button sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddMessageStyle {
    /// `StationSelect|...` with the site's metadata.
    #[default]
    Station,
    /// `ID:<internalId>` of the selected parameter.
    InternalId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub initial_center: LatLng,
    pub initial_zoom: f64,
    /// Zoom used when the host moves the map to a marker.
    pub marker_zoom: f64,
    pub add_message: AddMessageStyle,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_center: LatLng::new(43.0, -113.0),
            initial_zoom: 7.0,
            marker_zoom: 12.0,
            add_message: AddMessageStyle::Station,
        }
    }
}

impl MapConfig {
    /// Parse a JSON config object. Missing fields take their defaults.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("invalid map configuration")
    }
}
