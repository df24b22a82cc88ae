//! Area searches over an indexed catalog.

use crate::source::load_catalog;
use hydromap_catalog::dataset::normalize_huc8;
use hydromap_catalog::geometry::{BoundingBox, LatLng};
use log::info;

/// Where to search.
#[derive(Debug, Clone, PartialEq)]
pub enum Area {
    Bounds(BoundingBox),
    Watersheds(Vec<String>),
}

/// Parse `N,W,S,E`. The corners may come in either order.
pub fn parse_bbox(text: &str) -> Result<BoundingBox, String> {
    let values = text
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid coordinate in '{}': {}", text, e))?;
    match values[..] {
        [north, west, south, east] => Ok(BoundingBox::from_corners(
            LatLng::new(north, west),
            LatLng::new(south, east),
        )),
        _ => Err(format!("expected N,W,S,E but got {} values", values.len())),
    }
}

/// Write the matching dataset parameters as CSV.
pub async fn run_search(catalog_src: &str, area: &Area) -> anyhow::Result<()> {
    let (_, db) = load_catalog(catalog_src).await?;
    let rows = match area {
        Area::Bounds(bbox) => db.query_datasets_in_bounds(bbox)?,
        Area::Watersheds(codes) => {
            let codes: Vec<String> = codes.iter().map(|c| normalize_huc8(c)).collect();
            db.query_datasets_in_watersheds(&codes)?
        }
    };
    info!("Found {} dataset parameters", rows.len());

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

    #[test]
    fn parses_bbox() {
        let bbox = parse_bbox("42.0,-114.0,37.0,-109.0").unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                north: 42.0,
                west: -114.0,
                south: 37.0,
                east: -109.0
            }
        );
    }

    #[test]
    fn bbox_corners_are_normalized() {
        let bbox = parse_bbox("37, -109, 42, -114").unwrap();
        assert_eq!(bbox.north, 42.0);
        assert_eq!(bbox.west, -114.0);
        assert_eq!(bbox.south, 37.0);
        assert_eq!(bbox.east, -109.0);
    }

    #[test]
    fn rejects_bad_bbox() {
        assert!(parse_bbox("42,-114,37").is_err());
        assert!(parse_bbox("north,-114,37,-109").is_err());
        assert!(parse_bbox("").is_err());
    }
}
