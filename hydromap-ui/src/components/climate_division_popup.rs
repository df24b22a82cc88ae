//! Popup content for a climate division.

use crate::state::AppState;
use dioxus::prelude::*;
use hydromap_session::message::DroughtIndex;
use hydromap_session::popup::ClimateDivisionPopup;
use hydromap_session::MapSession;

#[derive(Props, Clone, PartialEq)]
pub struct ClimateDivisionPopupViewProps {
    pub popup: ClimateDivisionPopup,
}

#[component]
pub fn ClimateDivisionPopupView(props: ClimateDivisionPopupViewProps) -> Element {
    let state = use_context::<AppState>();
    let session = use_context::<MapSession>();
    let popup = &props.popup;
    let options: Vec<(&'static str, &'static str, bool)> = DroughtIndex::ALL
        .into_iter()
        .map(|i| (i.code(), i.label(), i == popup.index))
        .collect();

    let select_session = session.clone();
    let on_select = move |evt: Event<FormData>| {
        if let Some(index) = DroughtIndex::from_code(&evt.value()) {
            select_session.update(|c| c.select_drought_index(index));
            state.sync(&select_session);
        }
    };

    let on_add = move |_| {
        session.update(|c| c.confirm_add());
        state.sync(&session);
    };

    rsx! {
        div {
            h4 { style: "margin: 0 0 4px 0; font-size: 14px;", "NAME: {popup.name}" }
            div { "Number: {popup.code}" }
            select {
                style: "margin: 6px 0; max-width: 100%;",
                onchange: on_select,
                for (code, label, selected) in options {
                    option { value: "{code}", selected: selected, "{label}" }
                }
            }
            div {
                button {
                    style: "padding: 4px 12px; cursor: pointer;",
                    onclick: on_add,
                    "Add Drought Index"
                }
            }
        }
    }
}
