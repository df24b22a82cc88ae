//! Loading indicator component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadingSpinnerProps {
    pub label: String,
}

/// Small overlay shown while map data is loading.
#[component]
pub fn LoadingSpinner(props: LoadingSpinnerProps) -> Element {
    rsx! {
        div {
            style: "position: absolute; bottom: 24px; left: 12px; z-index: 1000; padding: 6px 12px; background: rgba(255,255,255,0.9); border-radius: 4px; color: #666; font-size: 12px;",
            "{props.label}"
        }
    }
}
