//! Drawing commands for the map script.
//!
//! The controller never touches the map itself. It queues [`MapCommand`]s,
//! which the web layer serializes to JSON and replays against Leaflet.

use hydromap_catalog::geometry::LatLng;
use hydromap_catalog::layer::LayerKind;
use serde::Serialize;
use serde_json::Value;

/// Every overlay the layer control knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerId {
    Dataset(LayerKind),
    Watersheds,
    ClimateDivisions,
}

impl LayerId {
    /// Layer-control order: station layers, then areas.
    pub fn all() -> Vec<LayerId> {
        LayerKind::ALL
            .into_iter()
            .map(LayerId::Dataset)
            .chain([LayerId::Watersheds, LayerId::ClimateDivisions])
            .collect()
    }

    pub fn key(&self) -> &'static str {
        match self {
            LayerId::Dataset(kind) => kind.key(),
            LayerId::Watersheds => "WATERSHEDS",
            LayerId::ClimateDivisions => "CLIMDIV",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "WATERSHEDS" => Some(LayerId::Watersheds),
            "CLIMDIV" => Some(LayerId::ClimateDivisions),
            other => LayerKind::from_key(other).map(LayerId::Dataset),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LayerId::Dataset(kind) => kind.label(),
            LayerId::Watersheds => "Watersheds",
            LayerId::ClimateDivisions => "Climate Divisions",
        }
    }

    /// Resolve a layer-control label or a registry key.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        LayerId::all()
            .into_iter()
            .find(|id| id.label() == name)
            .or_else(|| LayerId::from_key(name))
    }

    pub fn is_area(&self) -> bool {
        matches!(self, LayerId::Watersheds | LayerId::ClimateDivisions)
    }
}

/// Leaflet path style, serialized with Leaflet's option names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaStyle {
    pub color: &'static str,
    pub weight: f64,
    pub opacity: f64,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
}

impl AreaStyle {
    pub const WATERSHED: AreaStyle = AreaStyle {
        color: "#4286f4",
        weight: 1.0,
        opacity: 0.8,
        fill_color: "#4286f4",
        fill_opacity: 0.0,
    };

    pub const WATERSHED_HOVER: AreaStyle = AreaStyle {
        color: "#4872ff",
        weight: 3.0,
        opacity: 0.8,
        fill_color: "#4286f4",
        fill_opacity: 0.0,
    };

    pub const WATERSHED_SELECTED: AreaStyle = AreaStyle {
        color: "#4286f4",
        weight: 2.0,
        opacity: 0.8,
        fill_color: "#0080ff",
        fill_opacity: 0.4,
    };

    pub const CLIMATE_DIVISION: AreaStyle = AreaStyle {
        color: "#f5bb3d",
        weight: 1.0,
        opacity: 0.8,
        fill_color: "#f5bb3d",
        fill_opacity: 0.0,
    };

    pub const CLIMATE_DIVISION_HOVER: AreaStyle = AreaStyle {
        color: "#e4ba0e",
        weight: 3.0,
        opacity: 0.8,
        fill_color: "#f5bb3d",
        fill_opacity: 0.0,
    };

    /// Resting style of an area layer.
    pub fn default_for(layer: LayerId) -> AreaStyle {
        match layer {
            LayerId::ClimateDivisions => AreaStyle::CLIMATE_DIVISION,
            _ => AreaStyle::WATERSHED,
        }
    }

    pub fn hover_for(layer: LayerId) -> AreaStyle {
        match layer {
            LayerId::ClimateDivisions => AreaStyle::CLIMATE_DIVISION_HOVER,
            _ => AreaStyle::WATERSHED_HOVER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MapCommand {
    /// Circle-marker layer; each feature has `idx` and `name` properties.
    AddDatasetLayer {
        layer: String,
        label: String,
        color: String,
        geojson: Value,
        visible: bool,
    },
    /// Polygon layer; each feature has `idx`, `name` and `code` properties.
    AddAreaLayer {
        layer: String,
        label: String,
        geojson: Value,
        style: AreaStyle,
        visible: bool,
    },
    SetView {
        center: LatLng,
        zoom: f64,
    },
    ShowLayer {
        layer: String,
    },
    HideLayer {
        layer: String,
    },
    StyleFeature {
        layer: String,
        index: usize,
        style: AreaStyle,
    },
    ResetLayerStyle {
        layer: String,
        style: AreaStyle,
    },
    /// Marks where the open popup belongs. Its content is rendered by the app.
    OpenPopup {
        anchor: LatLng,
    },
    ClosePopup,
    StartRectangle,
    StopRectangle,
}

impl MapCommand {
    pub fn show(layer: LayerId) -> Self {
        MapCommand::ShowLayer {
            layer: layer.key().to_string(),
        }
    }

    pub fn hide(layer: LayerId) -> Self {
        MapCommand::HideLayer {
            layer: layer.key().to_string(),
        }
    }

    pub fn style(layer: LayerId, index: usize, style: AreaStyle) -> Self {
        MapCommand::StyleFeature {
            layer: layer.key().to_string(),
            index,
            style,
        }
    }

    pub fn reset_style(layer: LayerId) -> Self {
        MapCommand::ResetLayerStyle {
            layer: layer.key().to_string(),
            style: AreaStyle::default_for(layer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_names_resolve_by_label_or_key() {
        assert_eq!(
            LayerId::from_name("USGS Streamgages"),
            Some(LayerId::Dataset(LayerKind::Streamgage))
        );
        assert_eq!(LayerId::from_name("CLIMDIV"), Some(LayerId::ClimateDivisions));
        assert_eq!(LayerId::from_name(" Watersheds "), Some(LayerId::Watersheds));
        assert_eq!(LayerId::from_name("Counties"), None);
        assert_eq!(LayerId::all().len(), 10);
        for id in LayerId::all() {
            assert_eq!(LayerId::from_key(id.key()), Some(id));
        }
    }

    #[test]
    fn commands_serialize_for_the_map_script() {
        let cmd = MapCommand::style(LayerId::Watersheds, 3, AreaStyle::WATERSHED_SELECTED);
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["op"], "style_feature");
        assert_eq!(json["layer"], "WATERSHEDS");
        assert_eq!(json["index"], 3);
        assert_eq!(json["style"]["fillColor"], "#0080ff");
        assert_eq!(json["style"]["fillOpacity"], 0.4);
        assert_eq!(json["style"]["weight"], 2.0);

        let json = serde_json::to_value(&MapCommand::ClosePopup).unwrap();
        assert_eq!(json["op"], "close_popup");

        let json = serde_json::to_value(&MapCommand::SetView {
            center: LatLng::new(43.0, -113.0),
            zoom: 7.0,
        })
        .unwrap();
        assert_eq!(json["center"]["lat"], 43.0);
    }

    #[test]
    fn reset_uses_each_layers_resting_style() {
        match MapCommand::reset_style(LayerId::ClimateDivisions) {
            MapCommand::ResetLayerStyle { layer, style } => {
                assert_eq!(layer, "CLIMDIV");
                assert_eq!(style.color, "#f5bb3d");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
