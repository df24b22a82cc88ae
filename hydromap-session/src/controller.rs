//! The map controller: owns all interaction state for one widget session.
//!
//! Inputs are host calls and [`MapEvent`]s from the map script. Outputs are
//! queued [`HostMessage`]s (held by the [`HostBridge`], drained with
//! [`MapController::take_messages`]) and queued [`MapCommand`]s drained with
//! [`MapController::take_commands`].

use crate::command::{AreaStyle, LayerId, MapCommand};
use crate::config::MapConfig;
use crate::event::MapEvent;
use crate::message::{DroughtIndex, HostBridge, HostMessage, HostSink};
use crate::popup::{ClimateDivisionPopup, OpenPopup, Popup, SitePopup, WatershedPopup};
use crate::selection::{BoxSelection, RegionSelection, SelectionMode, Toggle};
use hydromap_catalog::geometry::{BoundingBox, LatLng};
use hydromap_catalog::layer::LayerKind;
use hydromap_catalog::watershed::{areas_to_geojson, AreaFeature, WatershedEntry};
use hydromap_catalog::Catalog;
use std::collections::BTreeSet;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
}

/// The most recently finished area selection.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchArea {
    Watersheds(Vec<String>),
    Bounds(BoundingBox),
}

pub struct MapController {
    config: MapConfig,
    bridge: HostBridge,
    catalog: Option<Catalog>,
    watersheds: Vec<AreaFeature>,
    climate_divisions: Vec<AreaFeature>,
    selection: RegionSelection,
    drawing: BoxSelection,
    popup: Option<OpenPopup>,
    visible: BTreeSet<LayerId>,
    viewport: Viewport,
    last_area: Option<SearchArea>,
    outbox: Vec<MapCommand>,
}

impl MapController {
    pub fn new(config: MapConfig, sink: Box<dyn HostSink>) -> Self {
        let viewport = Viewport {
            center: config.initial_center,
            zoom: config.initial_zoom,
        };
        let mut controller = Self {
            config,
            bridge: HostBridge::new(sink),
            catalog: None,
            watersheds: Vec::new(),
            climate_divisions: Vec::new(),
            selection: RegionSelection::default(),
            drawing: BoxSelection::default(),
            popup: None,
            visible: BTreeSet::new(),
            viewport,
            last_area: None,
            outbox: Vec::new(),
        };
        controller.push_view(viewport.center, viewport.zoom);
        controller
    }

    /// Commands queued since the last call.
    pub fn take_commands(&mut self) -> Vec<MapCommand> {
        std::mem::take(&mut self.outbox)
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Replace the configuration and return to its initial view.
    pub fn configure(&mut self, config: MapConfig) {
        self.config = config;
        self.push_view(self.config.initial_center, self.config.initial_zoom);
    }

    pub fn set_sink(&mut self, sink: Box<dyn HostSink>) {
        self.bridge.set_sink(sink);
    }

    /// Host messages emitted since the last call, not yet delivered.
    pub fn take_messages(&mut self) -> Vec<HostMessage> {
        self.bridge.take_pending()
    }

    pub fn sink(&self) -> Rc<dyn HostSink> {
        self.bridge.sink()
    }

    // ───────────────────── Loading ─────────────────────

    /// Register the watershed and climate-division layers. Watersheds start
    /// visible; the two area layers are mutually exclusive.
    pub fn load_areas(&mut self, watersheds: Vec<AreaFeature>, climate_divisions: Vec<AreaFeature>) {
        for (layer, areas, visible) in [
            (LayerId::Watersheds, &watersheds, true),
            (LayerId::ClimateDivisions, &climate_divisions, false),
        ] {
            self.outbox.push(MapCommand::AddAreaLayer {
                layer: layer.key().to_string(),
                label: layer.label().to_string(),
                geojson: areas_to_geojson(areas),
                style: AreaStyle::default_for(layer),
                visible,
            });
            self.set_visible(layer, visible);
        }
        self.watersheds = watersheds;
        self.climate_divisions = climate_divisions;
    }

    /// Build the station layers. A session accepts exactly one catalog.
    pub fn load_catalog(&mut self, catalog: Catalog) -> anyhow::Result<()> {
        if self.catalog.is_some() {
            log::warn!("[HydroMap] session: rejected second dataset catalog load");
            anyhow::bail!("dataset catalog already loaded; layers are built once per session");
        }
        for layer in catalog.layers().iter() {
            let id = LayerId::Dataset(layer.kind);
            let visible = layer.kind.visible_by_default();
            self.outbox.push(MapCommand::AddDatasetLayer {
                layer: id.key().to_string(),
                label: id.label().to_string(),
                color: layer.kind.marker_color().to_string(),
                geojson: layer.to_geojson(catalog.datasets()),
                visible,
            });
            self.set_visible(id, visible);
        }
        self.catalog = Some(catalog);
        Ok(())
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    // ───────────────────── Map events ─────────────────────

    pub fn handle_event(&mut self, event: MapEvent) {
        match event {
            MapEvent::Click {
                layer,
                index,
                lat,
                lng,
            } => match LayerId::from_key(&layer) {
                Some(id) => self.click(id, index, LatLng::new(lat, lng)),
                None => log::warn!("[HydroMap] session: click on unknown layer '{}'", layer),
            },
            MapEvent::Hover { layer, index } => {
                if let Some(id) = LayerId::from_key(&layer) {
                    self.hover(id, index, true);
                }
            }
            MapEvent::HoverEnd { layer, index } => {
                if let Some(id) = LayerId::from_key(&layer) {
                    self.hover(id, index, false);
                }
            }
            rect @ MapEvent::Rectangle { .. } => {
                if let Some(bounds) = rect.bounds() {
                    self.set_drawn_bounds(bounds);
                }
            }
            MapEvent::Moved { lat, lng, zoom } => self.viewport_changed(LatLng::new(lat, lng), zoom),
            MapEvent::LayerToggled { layer, visible } => match LayerId::from_key(&layer) {
                Some(id) => self.layer_toggled(id, visible),
                None => log::warn!("[HydroMap] session: toggle of unknown layer '{}'", layer),
            },
        }
    }

    /// Click on feature `index` of `layer`; `pointer` is the click position.
    pub fn click(&mut self, layer: LayerId, index: usize, pointer: LatLng) {
        match layer {
            LayerId::Dataset(kind) => self.open_site(kind, index, pointer),
            LayerId::Watersheds if self.selection.is_selecting() => self.toggle_watershed(index),
            LayerId::Watersheds => self.open_watershed(index, pointer),
            LayerId::ClimateDivisions => self.open_climate_division(index, pointer),
        }
    }

    /// Area highlight on hover. Point tooltips are handled by the map script.
    pub fn hover(&mut self, layer: LayerId, index: usize, entering: bool) {
        if !layer.is_area() || self.area(layer, index).is_none() {
            return;
        }
        // selection and box drawing own the watershed styling
        if layer == LayerId::Watersheds && (self.selection.is_selecting() || self.drawing.is_active()) {
            return;
        }
        let style = if entering {
            AreaStyle::hover_for(layer)
        } else {
            AreaStyle::default_for(layer)
        };
        self.outbox.push(MapCommand::style(layer, index, style));
    }

    fn area(&self, layer: LayerId, index: usize) -> Option<&AreaFeature> {
        match layer {
            LayerId::Watersheds => self.watersheds.get(index),
            LayerId::ClimateDivisions => self.climate_divisions.get(index),
            LayerId::Dataset(_) => None,
        }
    }

    // ───────────────────── Popups ─────────────────────

    fn open(&mut self, anchor: LatLng, popup: Popup) {
        self.outbox.push(MapCommand::OpenPopup { anchor });
        self.popup = Some(OpenPopup { anchor, popup });
    }

    fn open_site(&mut self, kind: LayerKind, index: usize, pointer: LatLng) {
        let dataset = self
            .catalog
            .as_ref()
            .and_then(|c| c.dataset_in_layer(kind, index))
            .cloned();
        match dataset {
            Some(dataset) => {
                let anchor = dataset.location.unwrap_or(pointer);
                self.open(anchor, Popup::Site(SitePopup::new(dataset)));
            }
            None => log::warn!(
                "[HydroMap] session: no dataset {} in layer {}",
                index,
                kind.key()
            ),
        }
    }

    fn open_watershed(&mut self, index: usize, pointer: LatLng) {
        let Some(area) = self.watersheds.get(index) else {
            log::warn!("[HydroMap] session: no watershed {}", index);
            return;
        };
        let entry = match &self.catalog {
            Some(catalog) => catalog.watersheds().entry(&area.code),
            None => WatershedEntry::new(&area.code),
        };
        let anchor = area.popup_anchor(pointer);
        let popup = WatershedPopup::new(&area.name, entry);
        self.open(anchor, Popup::Watershed(popup));
    }

    fn open_climate_division(&mut self, index: usize, pointer: LatLng) {
        let Some(area) = self.climate_divisions.get(index) else {
            log::warn!("[HydroMap] session: no climate division {}", index);
            return;
        };
        let anchor = area.popup_anchor(pointer);
        let popup = ClimateDivisionPopup::new(&area.code, &area.name);
        self.open(anchor, Popup::ClimateDivision(popup));
    }

    pub fn popup(&self) -> Option<&OpenPopup> {
        self.popup.as_ref()
    }

    /// Choose a parameter in an open multi-parameter site popup.
    pub fn select_parameter(&mut self, index: usize) -> bool {
        match &mut self.popup {
            Some(OpenPopup {
                popup: Popup::Site(site),
                ..
            }) => site.select_parameter(index),
            _ => false,
        }
    }

    pub fn toggle_checklist_item(&mut self, index: usize) -> bool {
        match &mut self.popup {
            Some(OpenPopup {
                popup: Popup::Watershed(shed),
                ..
            }) => shed.toggle(index),
            _ => false,
        }
    }

    pub fn set_select_all(&mut self, checked: bool) {
        if let Some(OpenPopup {
            popup: Popup::Watershed(shed),
            ..
        }) = &mut self.popup
        {
            shed.set_all(checked);
        }
    }

    pub fn select_drought_index(&mut self, index: DroughtIndex) {
        if let Some(OpenPopup {
            popup: Popup::ClimateDivision(div),
            ..
        }) = &mut self.popup
        {
            div.index = index;
        }
    }

    /// The popup's "Add" button. Sends one message per confirmed selection
    /// and closes the popup. A checklist with nothing checked sends nothing
    /// and stays open.
    pub fn confirm_add(&mut self) -> Vec<HostMessage> {
        let messages = match self.popup.as_ref().map(|p| &p.popup) {
            Some(Popup::Site(site)) => vec![site.add_message(self.config.add_message)],
            Some(Popup::Watershed(shed)) => shed.add_messages(),
            Some(Popup::ClimateDivision(div)) => vec![div.add_message()],
            None => return Vec::new(),
        };
        if messages.is_empty() {
            return messages;
        }
        for message in &messages {
            self.bridge.emit(message.clone());
        }
        self.close_popup();
        messages
    }

    pub fn close_popup(&mut self) {
        if self.popup.take().is_some() {
            self.outbox.push(MapCommand::ClosePopup);
        }
    }

    // ───────────────────── View ─────────────────────

    fn push_view(&mut self, center: LatLng, zoom: f64) {
        self.outbox.push(MapCommand::SetView { center, zoom });
    }

    pub fn move_to_marker(&mut self, lat: f64, lng: f64) {
        self.push_view(LatLng::new(lat, lng), self.config.marker_zoom);
    }

    pub fn zoom_to(&mut self, lat: f64, lng: f64, zoom: f64) {
        self.push_view(LatLng::new(lat, lng), zoom);
    }

    /// Record a finished move or zoom and report it to the host.
    pub fn viewport_changed(&mut self, center: LatLng, zoom: f64) {
        self.viewport = Viewport { center, zoom };
        self.bridge.emit(HostMessage::Position { center, zoom });
    }

    pub fn position(&self) -> HostMessage {
        HostMessage::Position {
            center: self.viewport.center,
            zoom: self.viewport.zoom,
        }
    }

    // ───────────────────── Watershed selection ─────────────────────

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    pub fn selected_watersheds(&self) -> &[String] {
        self.selection.selected()
    }

    /// Enter `Selecting`: watersheds shown, climate divisions hidden,
    /// styling reset, popup closed, selection emptied.
    pub fn enable_huc_select(&mut self) {
        self.close_popup();
        self.show_overlay(LayerId::Watersheds);
        self.outbox.push(MapCommand::reset_style(LayerId::Watersheds));
        self.selection.begin();
    }

    fn toggle_watershed(&mut self, index: usize) {
        let Some(code) = self.watersheds.get(index).map(|a| a.code.clone()) else {
            log::warn!("[HydroMap] session: no watershed {}", index);
            return;
        };
        let style = match self.selection.toggle(&code) {
            Toggle::Added => AreaStyle::WATERSHED_SELECTED,
            Toggle::Removed => AreaStyle::WATERSHED,
            Toggle::Ignored => return,
        };
        // a HUC8 may be drawn as several polygons
        let parts: Vec<usize> = self
            .watersheds
            .iter()
            .enumerate()
            .filter(|(_, a)| a.code == code)
            .map(|(i, _)| i)
            .collect();
        for i in parts {
            self.outbox.push(MapCommand::style(LayerId::Watersheds, i, style));
        }
    }

    /// Leave `Selecting` and return the selected HUC8 codes in click order.
    /// Returns an empty list when not selecting.
    pub fn finish_huc_select(&mut self) -> Vec<String> {
        if !self.selection.is_selecting() {
            return Vec::new();
        }
        self.outbox.push(MapCommand::reset_style(LayerId::Watersheds));
        let hucs = self.selection.finish();
        self.last_area = Some(SearchArea::Watersheds(hucs.clone()));
        hucs
    }

    // ───────────────────── Bounding box ─────────────────────

    pub fn enable_box_select(&mut self) {
        self.outbox.push(MapCommand::reset_style(LayerId::Watersheds));
        self.drawing.begin();
        self.outbox.push(MapCommand::StartRectangle);
    }

    pub fn set_drawn_bounds(&mut self, bounds: BoundingBox) {
        if !self.drawing.update(bounds) {
            log::debug!("[HydroMap] session: rectangle bounds while not drawing");
        }
    }

    /// Stop drawing and return the `COORDS` message for the drawn box.
    /// None when no box is being drawn or none was reported yet.
    pub fn finish_box_select(&mut self) -> Option<HostMessage> {
        if !self.drawing.is_active() {
            return None;
        }
        self.outbox.push(MapCommand::StopRectangle);
        let bounds = self.drawing.finish()?;
        self.last_area = Some(SearchArea::Bounds(bounds));
        Some(HostMessage::Coords(bounds))
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing.is_active()
    }

    pub fn last_area(&self) -> Option<&SearchArea> {
        self.last_area.as_ref()
    }

    // ───────────────────── Layers ─────────────────────

    fn set_visible(&mut self, layer: LayerId, visible: bool) {
        if visible {
            self.visible.insert(layer);
        } else {
            self.visible.remove(&layer);
        }
    }

    fn show_overlay(&mut self, layer: LayerId) {
        if layer.is_area() {
            let other = match layer {
                LayerId::Watersheds => LayerId::ClimateDivisions,
                _ => LayerId::Watersheds,
            };
            if self.visible.contains(&other) {
                self.set_visible(other, false);
                self.outbox.push(MapCommand::hide(other));
            }
        }
        if !self.visible.contains(&layer) {
            self.set_visible(layer, true);
            self.outbox.push(MapCommand::show(layer));
        }
    }

    /// Labels of the visible overlays in layer-control order.
    pub fn active_layers(&self) -> Vec<&'static str> {
        self.visible.iter().map(LayerId::label).collect()
    }

    /// Show exactly the named overlays (labels or keys). Unknown names are
    /// logged and skipped. Of the two area overlays only the last one named
    /// is shown.
    pub fn set_active_layers(&mut self, names: &[String]) {
        let mut wanted = BTreeSet::new();
        let mut area = None;
        for name in names {
            match LayerId::from_name(name) {
                Some(id) if id.is_area() => area = Some(id),
                Some(id) => {
                    wanted.insert(id);
                }
                None => log::warn!("[HydroMap] session: unknown layer name '{}'", name),
            }
        }
        wanted.extend(area);
        for id in LayerId::all() {
            match (self.visible.contains(&id), wanted.contains(&id)) {
                (false, true) => self.outbox.push(MapCommand::show(id)),
                (true, false) => self.outbox.push(MapCommand::hide(id)),
                _ => {}
            }
        }
        self.visible = wanted;
    }

    /// The user switched an overlay in the layer control. Programmatic
    /// changes echo back here and are already recorded, so they send nothing.
    pub fn layer_toggled(&mut self, layer: LayerId, visible: bool) {
        if self.visible.contains(&layer) == visible {
            return;
        }
        // watershed selection needs the watershed overlay
        let leaves_watersheds = match layer {
            LayerId::Watersheds => !visible,
            LayerId::ClimateDivisions => visible,
            LayerId::Dataset(_) => false,
        };
        if self.selection.is_selecting() && leaves_watersheds {
            log::info!("[HydroMap] session: keeping watersheds shown while selecting");
            self.outbox.push(MapCommand::hide(LayerId::ClimateDivisions));
            self.outbox.push(MapCommand::show(LayerId::Watersheds));
            return;
        }
        if visible {
            // area overlays are exclusive
            self.show_overlay(layer);
        } else {
            self.set_visible(layer, false);
        }
        let names = self.active_layers().into_iter().map(String::from).collect();
        self.bridge.emit(HostMessage::ActiveLayers(names));
    }
}
