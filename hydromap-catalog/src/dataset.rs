use crate::feature::Feature;
use crate::geometry::LatLng;
use crate::layer::LayerKind;
use hydromap_utils::dates::format_por;
use serde::{Deserialize, Serialize};

/// Source-system discriminator carried in a feature's `DatasetType` property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DatasetType {
    Streamgage,
    Snotel,
    Snowcourse,
    Scan,
    Reservoir,
    Agrimet,
    Ncdc,
    /// Any other tag, kept verbatim (empty when the property is missing).
    Other(String),
}

impl DatasetType {
    /// Parse a catalog tag. Tags match exactly; anything else, including a
    /// lowercase spelling of a known tag, is preserved as `Other`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "STREAMGAGE" => DatasetType::Streamgage,
            "SNOTEL" => DatasetType::Snotel,
            "SNOWCOURSE" => DatasetType::Snowcourse,
            "SCAN" => DatasetType::Scan,
            "RESERVOIR" => DatasetType::Reservoir,
            "AGRIMET" => DatasetType::Agrimet,
            "NCDC" => DatasetType::Ncdc,
            _ => DatasetType::Other(tag.to_string()),
        }
    }

    /// The tag as it appears in the catalog and in host messages.
    pub fn tag(&self) -> &str {
        match self {
            DatasetType::Streamgage => "STREAMGAGE",
            DatasetType::Snotel => "SNOTEL",
            DatasetType::Snowcourse => "SNOWCOURSE",
            DatasetType::Scan => "SCAN",
            DatasetType::Reservoir => "RESERVOIR",
            DatasetType::Agrimet => "AGRIMET",
            DatasetType::Ncdc => "NCDC",
            DatasetType::Other(tag) => tag,
        }
    }

    pub fn layer_kind(&self) -> LayerKind {
        match self {
            DatasetType::Streamgage => LayerKind::Streamgage,
            DatasetType::Snotel => LayerKind::Snotel,
            DatasetType::Snowcourse => LayerKind::Snowcourse,
            DatasetType::Scan => LayerKind::Scan,
            DatasetType::Reservoir => LayerKind::Reservoir,
            DatasetType::Agrimet => LayerKind::Agrimet,
            DatasetType::Ncdc => LayerKind::Ncdc,
            DatasetType::Other(_) => LayerKind::Other,
        }
    }
}

/// One selectable parameter of a site, with its own catalog id and
/// period of record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSeries {
    pub internal_id: String,
    pub parameter: String,
    pub por_start: Option<String>,
    pub por_end: Option<String>,
}

impl ParameterSeries {
    /// Period of record as "<start year> - <end year>".
    pub fn por_label(&self) -> String {
        format_por(self.por_start.as_deref(), self.por_end.as_deref())
    }
}

/// A point dataset from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub dataset_type: DatasetType,
    pub agency: String,
    pub name: String,
    pub external_id: String,
    pub elevation: String,
    pub huc8: String,
    /// USBR region (reservoirs only)
    pub region: String,
    /// USBR parameter code (reservoirs only)
    pub pcode: String,
    pub location: Option<LatLng>,
    /// Parameters in catalog order. Never empty.
    pub parameters: Vec<ParameterSeries>,
}

/// Split a `|`-delimited catalog field. An empty field yields no items.
fn split_pipe(field: &str) -> Vec<&str> {
    if field.is_empty() {
        Vec::new()
    } else {
        field.split('|').map(str::trim).collect()
    }
}

/// Left-pad numeric HUC codes that lost their leading zero.
pub fn normalize_huc8(code: &str) -> String {
    let code = code.trim();
    let code = code.strip_suffix(".0").unwrap_or(code);
    if !code.is_empty() && code.len() < 8 && code.chars().all(|c| c.is_ascii_digit()) {
        format!("{:0>8}", code)
    } else {
        code.to_string()
    }
}

impl Dataset {
    /// Build a dataset from a catalog point feature.
    ///
    /// `DatasetInternalID`, `DatasetParameter`, `DatasetPORStart` and
    /// `DatasetPOREnd` are split on `|` here, once, and zipped by index.
    /// The internal id list decides the parameter count; shorter companion
    /// lists are padded with empty values.
    pub fn from_feature(feature: &Feature) -> Self {
        let ids_field = feature.text("DatasetInternalID");
        let params_field = feature.text("DatasetParameter");
        let starts_field = feature.text("DatasetPORStart");
        let ends_field = feature.text("DatasetPOREnd");

        let ids = split_pipe(&ids_field);
        let params = split_pipe(&params_field);
        let starts = split_pipe(&starts_field);
        let ends = split_pipe(&ends_field);

        if ids.len() > 1 && params.len() != ids.len() {
            log::warn!(
                "[HydroMap] catalog: {} internal ids but {} parameters for '{}'",
                ids.len(),
                params.len(),
                feature.text("DatasetName")
            );
        }

        let count = ids.len().max(1);
        let non_empty = |s: Option<&&str>| s.filter(|v| !v.is_empty()).map(|v| v.to_string());
        let parameters = (0..count)
            .map(|i| ParameterSeries {
                internal_id: ids.get(i).map(|s| s.to_string()).unwrap_or_default(),
                parameter: if ids.len() <= 1 {
                    params_field.clone()
                } else {
                    params.get(i).map(|s| s.to_string()).unwrap_or_default()
                },
                por_start: non_empty(starts.get(i)),
                por_end: non_empty(ends.get(i)),
            })
            .collect();

        Dataset {
            dataset_type: DatasetType::from_tag(&feature.text("DatasetType")),
            agency: feature.text("DatasetAgency"),
            name: feature.text("DatasetName"),
            external_id: feature.text("DatasetExternalID"),
            elevation: feature.text("DatasetElevation"),
            huc8: normalize_huc8(&feature.text("DatasetHUC8")),
            region: feature.text_any(&["DatasetRegion", "REGION"]),
            pcode: feature.text_any(&["DatasetPCODE", "PCODE"]),
            location: feature.point(),
            parameters,
        }
    }

    /// True when the site offers more than one parameter.
    pub fn is_multi_parameter(&self) -> bool {
        self.parameters.len() > 1
    }

    /// Link to the agency's site page, where one exists.
    pub fn website(&self) -> Option<String> {
        if self.agency == "USGS" {
            Some(format!(
                "https://waterdata.usgs.gov/nwis/inventory/?site_no={}",
                self.external_id
            ))
        } else if self.agency == "NRCS" && self.dataset_type == DatasetType::Snotel {
            Some(format!(
                "https://wcc.sc.egov.usda.gov/nwcc/site?sitenum={}",
                self.external_id
            ))
        } else {
            None
        }
    }
}
