//! Query result model structs.
//!
//! All structs derive `Serialize` so they can be handed to the host as JSON.

use serde::Serialize;

/// One selectable catalog parameter with its site's metadata.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatasetRow {
    pub internal_id: String,
    pub external_id: String,
    pub name: String,
    pub agency: String,
    pub dataset_type: String,
    pub parameter: String,
    pub huc8: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub por_start: Option<String>,
    pub por_end: Option<String>,
}

/// Number of selectable parameters per dataset type.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LayerCount {
    pub dataset_type: String,
    pub count: i64,
}

/// A watershed polygon and how many catalog parameters fall inside it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WatershedInfo {
    pub huc8: String,
    pub name: String,
    pub dataset_count: i64,
}
