//! Geographic primitives: positions, bounding boxes and polygon centers.

use geo_types::Coord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<Coord<f64>> for LatLng {
    fn from(c: Coord<f64>) -> Self {
        // GeoJSON positions are [longitude, latitude]
        Self { lat: c.y, lng: c.x }
    }
}

/// An axis-aligned box drawn on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub west: f64,
    pub south: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Build a box from any two opposite corners of a drawn rectangle.
    pub fn from_corners(a: LatLng, b: LatLng) -> Self {
        Self {
            north: a.lat.max(b.lat),
            south: a.lat.min(b.lat),
            west: a.lng.min(b.lng),
            east: a.lng.max(b.lng),
        }
    }

    pub fn north_west(&self) -> LatLng {
        LatLng::new(self.north, self.west)
    }

    pub fn south_east(&self) -> LatLng {
        LatLng::new(self.south, self.east)
    }

    pub fn contains(&self, p: LatLng) -> bool {
        p.lat <= self.north && p.lat >= self.south && p.lng >= self.west && p.lng <= self.east
    }
}

/// Read one GeoJSON position (`[lng, lat, ...]`).
///
/// Returns None unless both leading members are finite numbers.
pub fn position_from_json(value: &Value) -> Option<Coord<f64>> {
    let pair = value.as_array()?;
    let x = pair.first()?.as_f64()?;
    let y = pair.get(1)?.as_f64()?;
    if x.is_finite() && y.is_finite() {
        Some(Coord { x, y })
    } else {
        None
    }
}

/// Read the exterior ring of a Polygon or MultiPolygon geometry.
///
/// For a MultiPolygon the first member polygon is used. Vertices that are
/// not numeric pairs are skipped, so the result may be shorter than the
/// source ring or empty.
pub fn exterior_ring(geometry_type: &str, coordinates: &Value) -> Vec<Coord<f64>> {
    let ring = match geometry_type {
        "Polygon" => coordinates.get(0),
        "MultiPolygon" => coordinates.get(0).and_then(|poly| poly.get(0)),
        _ => None,
    };
    ring.and_then(Value::as_array)
        .map(|vertices| vertices.iter().filter_map(position_from_json).collect())
        .unwrap_or_default()
}

/// Mean of every vertex in the ring, or None when the ring is empty.
pub fn ring_center(ring: &[Coord<f64>]) -> Option<LatLng> {
    if ring.is_empty() {
        return None;
    }
    let count = ring.len() as f64;
    let (sum_x, sum_y) = ring
        .iter()
        .fold((0.0, 0.0), |(sx, sy), c| (sx + c.x, sy + c.y));
    Some(LatLng::new(sum_y / count, sum_x / count))
}

/// Popup anchor for a polygon: its vertex mean, or `fallback` (the pointer
/// position at click time) when no valid vertex exists.
pub fn center_or(ring: &[Coord<f64>], fallback: LatLng) -> LatLng {
    ring_center(ring).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn square_center_is_its_middle() {
        let coords = json!([[[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]]]);
        let ring = exterior_ring("Polygon", &coords);
        assert_eq!(ring.len(), 4);
        let center = center_or(&ring, LatLng::new(-1.0, -1.0));
        assert_eq!(center, LatLng::new(5.0, 5.0));
    }

    #[test]
    fn non_numeric_vertices_are_skipped() {
        let coords = json!([[[0.0, 0.0], ["x", 3.0], [null, null], [10.0, 10.0]]]);
        let ring = exterior_ring("Polygon", &coords);
        assert_eq!(ring.len(), 2);
        assert_eq!(ring_center(&ring), Some(LatLng::new(5.0, 5.0)));
    }

    #[test]
    fn all_non_numeric_falls_back_to_pointer() {
        let coords = json!([[["a", "b"], [null, 1.0], "junk"]]);
        let ring = exterior_ring("Polygon", &coords);
        assert!(ring.is_empty());
        let pointer = LatLng::new(43.5, -112.25);
        assert_eq!(center_or(&ring, pointer), pointer);
    }

    #[test]
    fn multipolygon_uses_first_polygon() {
        let coords = json!([
            [[[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0]]],
            [[[50.0, 50.0], [50.0, 60.0]]]
        ]);
        let ring = exterior_ring("MultiPolygon", &coords);
        assert_eq!(ring_center(&ring), Some(LatLng::new(1.0, 1.0)));
    }

    #[test]
    fn unsupported_geometry_has_no_ring() {
        let ring = exterior_ring("Point", &json!([1.0, 2.0]));
        assert!(ring.is_empty());
        assert_eq!(ring_center(&ring), None);
    }

    #[test]
    fn bounding_box_normalizes_corners() {
        let bb = BoundingBox::from_corners(LatLng::new(40.0, -110.0), LatLng::new(44.0, -115.0));
        assert_eq!(bb.north, 44.0);
        assert_eq!(bb.south, 40.0);
        assert_eq!(bb.west, -115.0);
        assert_eq!(bb.east, -110.0);
        assert!(bb.contains(LatLng::new(42.0, -112.0)));
        assert!(!bb.contains(LatLng::new(45.0, -112.0)));
        assert_eq!(bb.north_west(), LatLng::new(44.0, -115.0));
        assert_eq!(bb.south_east(), LatLng::new(40.0, -110.0));
    }
}
