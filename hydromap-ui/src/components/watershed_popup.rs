//! Popup content for a watershed: a checklist of its selectable datasets.

use crate::state::AppState;
use dioxus::prelude::*;
use hydromap_session::popup::WatershedPopup;
use hydromap_session::MapSession;

#[derive(Props, Clone, PartialEq)]
pub struct WatershedPopupViewProps {
    pub popup: WatershedPopup,
}

#[component]
pub fn WatershedPopupView(props: WatershedPopupViewProps) -> Element {
    let state = use_context::<AppState>();
    let session = use_context::<MapSession>();
    let popup = &props.popup;
    let items: Vec<(usize, String, String, bool)> = popup
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| (i, item.name.clone(), item.color.clone(), popup.is_checked(i)))
        .collect();
    let huc8 = popup.huc8().to_string();
    let all_checked = popup.all_checked();
    let any_checked = !popup.checked_items().is_empty();

    let all_session = session.clone();
    let on_select_all = move |evt: Event<FormData>| {
        let checked = evt.checked();
        all_session.update(|c| c.set_select_all(checked));
        state.sync(&all_session);
    };

    let add_session = session.clone();
    let on_add = move |_| {
        add_session.update(|c| c.confirm_add());
        state.sync(&add_session);
    };

    rsx! {
        div {
            h4 { style: "margin: 0 0 4px 0; font-size: 14px;", "HUC8: {huc8}" }
            div { style: "margin-bottom: 6px;", "Name: {popup.name}" }
            label {
                style: "display: block; font-weight: bold; border-bottom: 1px solid #ddd; padding-bottom: 4px; margin-bottom: 4px;",
                input {
                    r#type: "checkbox",
                    checked: all_checked,
                    onchange: on_select_all,
                }
                " Select all"
            }
            for (i, name, color, checked) in items {
                ChecklistRow { index: i, name: name, color: color, checked: checked }
            }
            button {
                style: "margin-top: 8px; padding: 4px 12px; cursor: pointer;",
                disabled: !any_checked,
                onclick: on_add,
                "Add Datasets"
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct ChecklistRowProps {
    index: usize,
    name: String,
    color: String,
    checked: bool,
}

#[component]
fn ChecklistRow(props: ChecklistRowProps) -> Element {
    let state = use_context::<AppState>();
    let session = use_context::<MapSession>();
    let index = props.index;

    let on_toggle = move |_| {
        session.update(|c| c.toggle_checklist_item(index));
        state.sync(&session);
    };

    rsx! {
        label {
            style: "display: block; margin: 2px 0;",
            input {
                r#type: "checkbox",
                checked: props.checked,
                onchange: on_toggle,
            }
            span {
                style: "display: inline-block; height: 10px; width: 10px; margin: 0 4px; border: 1px solid black; border-radius: 50%; background: {props.color};",
            }
            "{props.name}"
        }
    }
}
