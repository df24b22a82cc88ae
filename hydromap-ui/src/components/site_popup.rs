//! Popup content for a dataset marker.

use crate::state::AppState;
use dioxus::prelude::*;
use hydromap_session::popup::SitePopup;
use hydromap_session::MapSession;

#[derive(Props, Clone, PartialEq)]
pub struct SitePopupViewProps {
    pub popup: SitePopup,
}

/// Site metadata, a parameter selector for multi-parameter sites, the
/// period of record of the selected parameter, and the "Add" button.
#[component]
pub fn SitePopupView(props: SitePopupViewProps) -> Element {
    let state = use_context::<AppState>();
    let session = use_context::<MapSession>();
    let popup = &props.popup;
    let dataset = &popup.dataset;
    let choices = popup.choices().to_vec();
    let selected = popup.selected_index();
    let parameter = popup
        .selected()
        .map(|s| s.parameter.clone())
        .unwrap_or_default();
    let por = popup.por_label();
    let website = dataset.website();
    let multi = dataset.is_multi_parameter();
    let kind = dataset.dataset_type.tag().to_string();

    let select_session = session.clone();
    let on_select = move |evt: Event<FormData>| {
        if let Ok(index) = evt.value().parse::<usize>() {
            select_session.update(|c| c.select_parameter(index));
            state.sync(&select_session);
        }
    };

    let on_add = move |_| {
        session.update(|c| c.confirm_add());
        state.sync(&session);
    };

    rsx! {
        div {
            p { style: "margin: 0 0 4px 0;", strong { "{dataset.agency} {kind}" } }
            h4 { style: "margin: 0 0 6px 0; font-size: 14px;", "{dataset.name}" }
            div { "ID: {dataset.external_id}" }
            div { "Elevation: {dataset.elevation}" }
            if multi {
                div {
                    style: "margin: 4px 0;",
                    label { r#for: "hydromap-param", style: "margin-right: 6px;", "Parameter:" }
                    select {
                        id: "hydromap-param",
                        onchange: on_select,
                        for (i, series) in choices.iter().enumerate() {
                            option {
                                value: "{i}",
                                selected: i == selected,
                                "{series.parameter}"
                            }
                        }
                    }
                }
            } else {
                div { "Parameter: {parameter}" }
            }
            div { "POR: {por}" }
            if let Some(url) = website {
                div {
                    a { href: "{url}", target: "_blank", "Website" }
                }
            }
            button {
                style: "margin-top: 8px; padding: 4px 12px; cursor: pointer;",
                onclick: on_add,
                "Add Dataset"
            }
        }
    }
}
