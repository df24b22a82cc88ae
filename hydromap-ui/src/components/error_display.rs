//! Error banner over the map.

use crate::state::AppState;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
}

/// Banner for a load failure. Dismissing it clears `AppState::error_msg`;
/// the map keeps working with whatever did load.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    let mut state = use_context::<AppState>();

    rsx! {
        div {
            style: "position: absolute; top: 8px; left: 50%; transform: translateX(-50%); z-index: 1100; max-width: 60%; padding: 8px 12px; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A; font-size: 13px;",
            strong { "HydroMap: " }
            "{props.message}"
            button {
                style: "margin-left: 10px; border: none; background: none; color: #C62828; cursor: pointer; font-size: 14px;",
                title: "Dismiss",
                onclick: move |_| state.error_msg.set(None),
                "\u{00d7}"
            }
        }
    }
}
