//! In-memory SQLite index over the HydroMap dataset catalog.
//!
//! The map answers area searches (a drawn bounding box or a set of selected
//! watersheds) from this index rather than by walking the feature lists.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability in single-threaded WASM
//! - In-memory SQLite via `rusqlite` (compiles to WASM via `wasm32-unknown-unknown`)
//! - Rows are derived from an already-parsed [`hydromap_catalog::Catalog`]
//! - Typed query methods returning serializable structs for JSON export to the host
//!
//! # Usage
//!
//! ```rust
//! use hydromap_catalog::Catalog;
//! use hydromap_catalog::geometry::BoundingBox;
//! use hydromap_db::Database;
//!
//! let catalog = Catalog::from_geojson(r#"{"features": [
//!     {"geometry": {"type": "Point", "coordinates": [-111.9, 40.7]},
//!      "properties": {"DatasetType": "STREAMGAGE", "DatasetName": "Jordan River",
//!                     "DatasetInternalID": "11", "DatasetParameter": "Streamflow"}}
//! ]}"#).unwrap();
//!
//! let db = Database::new().unwrap();
//! db.load_catalog(&catalog).unwrap();
//!
//! let bbox = BoundingBox { north: 41.0, west: -112.0, south: 40.0, east: -111.0 };
//! let rows = db.query_datasets_in_bounds(&bbox).unwrap();
//! assert_eq!(rows.len(), 1);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//!
//! - `datasets` - One row per selectable parameter
//! - `watersheds` - HUC8 polygon names

pub mod schema;
mod loader;
mod queries;
pub mod models;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding the searchable catalog.
///
/// Cheaply cloneable (via `Rc`); clones share one connection.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods
    /// to populate it.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_connection() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        let catalog = hydromap_catalog::Catalog::from_geojson(
            r#"{"features": [{"properties": {"DatasetType": "SNOTEL", "DatasetInternalID": "5"}}]}"#,
        )
        .unwrap();
        db.load_catalog(&catalog).unwrap();
        let counts = db2.query_layer_counts().unwrap();
        assert_eq!(counts.len(), 1, "Clone should see same data via shared Rc");
    }

    #[test]
    fn new_database_has_no_rows() {
        let db = Database::new().unwrap();
        assert!(db.query_layer_counts().unwrap().is_empty());
        assert!(db.query_watersheds().unwrap().is_empty());
    }
}
