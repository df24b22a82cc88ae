//! Banner describing the current selection mode.

use crate::state::AppState;
use dioxus::prelude::*;
use hydromap_session::selection::SelectionMode;

/// Shown while the host has watershed selection or box drawing enabled.
#[component]
pub fn ModeBanner() -> Element {
    let state = use_context::<AppState>();
    let mode = (state.mode)();
    let count = (state.selected_count)();
    let drawing = (state.drawing)();

    let text = if mode == SelectionMode::Selecting {
        let noun = if count == 1 { "watershed" } else { "watersheds" };
        Some(format!("Click watersheds to select them ({} {} selected)", count, noun))
    } else if drawing {
        Some("Drag the rectangle corners to outline the search area".to_string())
    } else {
        None
    };

    rsx! {
        if let Some(text) = text {
            div {
                style: "position: absolute; top: 8px; left: 56px; z-index: 1000; padding: 6px 12px; background: #0080ff; color: white; border-radius: 4px; font-size: 13px; box-shadow: 0 1px 4px rgba(0,0,0,0.3);",
                "{text}"
            }
        }
    }
}
