//! Panel holding whichever popup is open.

use super::{ClimateDivisionPopupView, SitePopupView, WatershedPopupView};
use crate::state::AppState;
use dioxus::prelude::*;
use hydromap_session::popup::Popup;
use hydromap_session::MapSession;

/// Renders the open popup next to the map, with a close button.
#[component]
pub fn PopupPanel() -> Element {
    let state = use_context::<AppState>();
    let session = use_context::<MapSession>();
    let open = state.popup.read().clone();

    let Some(open) = open else {
        return rsx! {};
    };

    let body = match open.popup {
        Popup::Site(site) => rsx! { SitePopupView { popup: site } },
        Popup::Watershed(shed) => rsx! { WatershedPopupView { popup: shed } },
        Popup::ClimateDivision(div) => rsx! { ClimateDivisionPopupView { popup: div } },
    };

    let on_close = move |_| {
        session.update(|c| c.close_popup());
        state.sync(&session);
    };

    rsx! {
        div {
            style: "position: absolute; top: 8px; right: 8px; z-index: 1000; width: 300px; max-height: 80%; overflow-y: auto; padding: 12px 14px; background: white; border-radius: 6px; box-shadow: 0 2px 8px rgba(0,0,0,0.35); font-size: 13px;",
            button {
                style: "float: right; border: none; background: none; font-size: 16px; cursor: pointer; color: #666;",
                title: "Close",
                onclick: on_close,
                "\u{00d7}"
            }
            {body}
        }
    }
}
