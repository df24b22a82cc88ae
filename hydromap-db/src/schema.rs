//! SQL schema definitions for the in-memory SQLite database.
//!
//! The schema is applied as a single batch when the database is initialized.

/// Returns the full SQL schema as a single batch string.
///
/// This creates the following tables:
///
/// - `datasets` - One row per selectable catalog parameter (internal id),
///   with the owning site's metadata and location
/// - `watersheds` - HUC8 code and name of every loaded watershed polygon
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS datasets (
        internal_id TEXT PRIMARY KEY,
        external_id TEXT NOT NULL,
        name TEXT NOT NULL,
        agency TEXT NOT NULL,
        dataset_type TEXT NOT NULL,
        parameter TEXT NOT NULL,
        huc8 TEXT NOT NULL,
        latitude REAL,
        longitude REAL,
        por_start TEXT,
        por_end TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_datasets_huc8 ON datasets(huc8);
    CREATE INDEX IF NOT EXISTS idx_datasets_location ON datasets(latitude, longitude);

    CREATE TABLE IF NOT EXISTS watersheds (
        huc8 TEXT PRIMARY KEY,
        name TEXT NOT NULL
    );
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn schema_is_valid_sql() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema SQL should be valid");
    }

    #[test]
    fn schema_creates_all_tables_and_indexes() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        for (kind, name) in [
            ("table", "datasets"),
            ("table", "watersheds"),
            ("index", "idx_datasets_huc8"),
            ("index", "idx_datasets_location"),
        ] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = ?1 AND name = ?2",
                    [kind, name],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "{} '{}' should exist", kind, name);
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema())
            .expect("Applying schema twice should succeed due to IF NOT EXISTS");
    }
}
