//! Map events forwarded by the map script as JSON.

use anyhow::Context;
use hydromap_catalog::geometry::{BoundingBox, LatLng};
use serde::Deserialize;

/// `layer` is the registry key of the layer the event came from and
/// `index` the feature's `idx` property.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapEvent {
    Click {
        layer: String,
        index: usize,
        lat: f64,
        lng: f64,
    },
    Hover {
        layer: String,
        index: usize,
    },
    HoverEnd {
        layer: String,
        index: usize,
    },
    /// Bounds of the drawn rectangle changed.
    Rectangle {
        north: f64,
        west: f64,
        south: f64,
        east: f64,
    },
    /// Move or zoom finished.
    Moved {
        lat: f64,
        lng: f64,
        zoom: f64,
    },
    /// An overlay was switched in the layer control.
    LayerToggled {
        layer: String,
        visible: bool,
    },
}

impl MapEvent {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).with_context(|| format!("unrecognized map event: {}", text))
    }

    pub fn pointer(&self) -> Option<LatLng> {
        match self {
            MapEvent::Click { lat, lng, .. } => Some(LatLng::new(*lat, *lng)),
            _ => None,
        }
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        match *self {
            MapEvent::Rectangle {
                north,
                west,
                south,
                east,
            } => Some(BoundingBox::from_corners(
                LatLng::new(north, west),
                LatLng::new(south, east),
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_click() {
        let event =
            MapEvent::from_json(r#"{"kind": "click", "layer": "STREAMGAGE", "index": 4, "lat": 40.5, "lng": -111.2}"#)
                .unwrap();
        assert_eq!(
            event,
            MapEvent::Click {
                layer: "STREAMGAGE".into(),
                index: 4,
                lat: 40.5,
                lng: -111.2
            }
        );
        assert_eq!(event.pointer(), Some(LatLng::new(40.5, -111.2)));
    }

    #[test]
    fn rectangle_bounds_are_normalized() {
        let event = MapEvent::from_json(
            r#"{"kind": "rectangle", "north": 40.0, "west": -110.0, "south": 42.0, "east": -112.0}"#,
        )
        .unwrap();
        let bb = event.bounds().unwrap();
        assert_eq!((bb.north, bb.south), (42.0, 40.0));
        assert_eq!((bb.west, bb.east), (-112.0, -110.0));
    }

    #[test]
    fn rejects_unknown_events() {
        assert!(MapEvent::from_json(r#"{"kind": "teleport"}"#).is_err());
        assert!(MapEvent::from_json(r#"{"kind": "click", "layer": "SNOTEL"}"#).is_err());
    }
}
