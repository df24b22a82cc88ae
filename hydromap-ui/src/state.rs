//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//! The [`MapSession`] is the source of truth; the signals mirror the parts of
//! it that the page renders.

use crate::leaflet_bridge;
use hydromap_session::popup::OpenPopup;
use hydromap_session::selection::SelectionMode;
use hydromap_session::MapSession;
use dioxus::prelude::*;

#[derive(Clone, Copy)]
pub struct AppState {
    /// Whether the area layers are still loading
    pub loading: Signal<bool>,
    /// Whether the host has pushed the dataset catalog
    pub catalog_loaded: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Popup currently open on the map
    pub popup: Signal<Option<OpenPopup>>,
    pub mode: Signal<SelectionMode>,
    /// Number of watersheds picked in the current selection
    pub selected_count: Signal<usize>,
    /// Whether a bounding box is being drawn
    pub drawing: Signal<bool>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            loading: Signal::new(true),
            catalog_loaded: Signal::new(false),
            error_msg: Signal::new(None),
            popup: Signal::new(None),
            mode: Signal::new(SelectionMode::Browsing),
            selected_count: Signal::new(0),
            drawing: Signal::new(false),
        }
    }

    /// Replay queued map commands and mirror the session into the signals.
    pub fn sync(mut self, session: &MapSession) {
        let (commands, popup, mode, selected, drawing, catalog) = session.update(|c| {
            (
                c.take_commands(),
                c.popup().cloned(),
                c.selection_mode(),
                c.selected_watersheds().len(),
                c.is_drawing(),
                c.catalog().is_some(),
            )
        });
        leaflet_bridge::apply(&commands);

        if *self.popup.peek() != popup {
            self.popup.set(popup);
        }
        if *self.mode.peek() != mode {
            self.mode.set(mode);
        }
        if *self.selected_count.peek() != selected {
            self.selected_count.set(selected);
        }
        if *self.drawing.peek() != drawing {
            self.drawing.set(drawing);
        }
        if *self.catalog_loaded.peek() != catalog {
            self.catalog_loaded.set(catalog);
        }
    }
}
