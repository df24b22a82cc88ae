//! Host-callable functions installed on `window`.
//!
//! The embedding application drives the map by evaluating plain global calls
//! such as `enableHUCSelect()` or `zoomToLoc(40.7, -111.9, 9)`. Each call
//! updates the [`MapSession`] synchronously, so getters can answer right away,
//! and then asks the session coroutine to re-render.

use crate::SessionMsg;
use hydromap_catalog::Catalog;
use hydromap_db::Database;
use hydromap_session::config::MapConfig;
use hydromap_session::controller::{MapController, SearchArea};
use hydromap_session::message::HostMessage;
use hydromap_session::MapSession;
use hydromap_ui::host_sink::CallbackSink;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

struct HostHandle {
    session: MapSession,
    db: Database,
    notify: Box<dyn Fn(SessionMsg)>,
}

impl HostHandle {
    fn update<R>(&self, f: impl FnOnce(&mut MapController) -> R) -> R {
        let out = self.session.update(f);
        (self.notify)(SessionMsg::Refresh);
        out
    }

    fn load_catalog(&self, value: &JsValue) -> anyhow::Result<()> {
        let text = match value.as_string() {
            Some(text) => text,
            None => js_sys::JSON::stringify(value)
                .ok()
                .and_then(|s| s.as_string())
                .ok_or_else(|| anyhow::anyhow!("catalog is neither a string nor JSON"))?,
        };
        if self.session.read(|c| c.catalog().is_some()) {
            anyhow::bail!("dataset catalog is already loaded");
        }
        let catalog = Catalog::from_geojson(&text)?;
        self.db.load_catalog(&catalog)?;
        self.update(|c| c.load_catalog(catalog))
    }

    fn search_selected_area(&self) -> anyhow::Result<String> {
        let area = self.session.read(|c| c.last_area().cloned());
        let rows = match area {
            Some(SearchArea::Watersheds(hucs)) => self.db.query_datasets_in_watersheds(&hucs)?,
            Some(SearchArea::Bounds(bbox)) => self.db.query_datasets_in_bounds(&bbox)?,
            None => Vec::new(),
        };
        Ok(serde_json::to_string(&rows)?)
    }
}

/// Split a `setActiveLayers` argument: an array of names or one
/// comma-separated string.
fn layer_names(value: &JsValue) -> Vec<String> {
    if let Some(text) = value.as_string() {
        return split_layer_names(&text);
    }
    if js_sys::Array::is_array(value) {
        return js_sys::Array::from(value)
            .iter()
            .filter_map(|v| v.as_string())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    Vec::new()
}

fn split_layer_names(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn expose(window: &JsValue, name: &str, function: JsValue) {
    if js_sys::Reflect::set(window, &JsValue::from_str(name), &function).is_err() {
        log::warn!("[HydroMap] could not install window.{}", name);
    }
}

/// Install the host interface and the map event entry point on `window`.
pub fn install(session: MapSession, notify: impl Fn(SessionMsg) + 'static, db: Database) {
    let Some(window) = web_sys::window() else {
        log::error!("[HydroMap] no window; host interface not installed");
        return;
    };
    let window: &JsValue = window.as_ref();
    let handle = Rc::new(HostHandle {
        session,
        db,
        notify: Box::new(notify),
    });

    let h = handle.clone();
    expose(
        window,
        "__hydromapEvent",
        Closure::<dyn Fn(String)>::new(move |json: String| (h.notify)(SessionMsg::Event(json)))
            .into_js_value(),
    );

    let h = handle.clone();
    expose(
        window,
        "loadDatasetCatalog",
        Closure::<dyn Fn(JsValue) -> bool>::new(move |value: JsValue| {
            match h.load_catalog(&value) {
                Ok(()) => true,
                Err(e) => {
                    log::error!("[HydroMap] failed to load dataset catalog: {:#}", e);
                    false
                }
            }
        })
        .into_js_value(),
    );

    let h = handle.clone();
    expose(
        window,
        "moveToMarker",
        Closure::<dyn Fn(f64, f64)>::new(move |lat: f64, lng: f64| h.update(|c| c.move_to_marker(lat, lng)))
            .into_js_value(),
    );

    let h = handle.clone();
    expose(
        window,
        "zoomToLoc",
        Closure::<dyn Fn(f64, f64, f64)>::new(move |lat: f64, lng: f64, zoom: f64| {
            h.update(|c| c.zoom_to(lat, lng, zoom))
        })
        .into_js_value(),
    );

    let h = handle.clone();
    expose(
        window,
        "enableHUCSelect",
        Closure::<dyn Fn()>::new(move || h.update(|c| c.enable_huc_select())).into_js_value(),
    );

    let h = handle.clone();
    expose(
        window,
        "getSelectedHUCs",
        Closure::<dyn Fn() -> js_sys::Array>::new(move || {
            h.update(|c| c.finish_huc_select())
                .iter()
                .map(|huc| JsValue::from_str(huc))
                .collect()
        })
        .into_js_value(),
    );

    let h = handle.clone();
    expose(
        window,
        "enableBBSelect",
        Closure::<dyn Fn()>::new(move || h.update(|c| c.enable_box_select())).into_js_value(),
    );

    let h = handle.clone();
    expose(
        window,
        "getBBCoords",
        Closure::<dyn Fn() -> String>::new(move || {
            h.update(|c| c.finish_box_select())
                .map(|m| m.to_string())
                .unwrap_or_default()
        })
        .into_js_value(),
    );

    let h = handle.clone();
    expose(
        window,
        "setActiveLayers",
        Closure::<dyn Fn(JsValue)>::new(move |value: JsValue| {
            let names = layer_names(&value);
            h.update(|c| c.set_active_layers(&names))
        })
        .into_js_value(),
    );

    let h = handle.clone();
    expose(
        window,
        "getActiveLayers",
        Closure::<dyn Fn() -> String>::new(move || {
            h.session.read(|c| {
                let names = c.active_layers().into_iter().map(str::to_string).collect();
                HostMessage::ActiveLayers(names).to_string()
            })
        })
        .into_js_value(),
    );

    let h = handle.clone();
    expose(
        window,
        "getPosition",
        Closure::<dyn Fn() -> String>::new(move || h.session.read(|c| c.position().to_string()))
            .into_js_value(),
    );

    let h = handle.clone();
    expose(
        window,
        "configure",
        Closure::<dyn Fn(String) -> bool>::new(move |json: String| match MapConfig::from_json(&json) {
            Ok(config) => {
                h.update(|c| c.configure(config));
                true
            }
            Err(e) => {
                log::error!("[HydroMap] {:#}", e);
                false
            }
        })
        .into_js_value(),
    );

    let h = handle.clone();
    expose(
        window,
        "setHostCallback",
        Closure::<dyn Fn(js_sys::Function)>::new(move |callback: js_sys::Function| {
            h.session
                .update(|c| c.set_sink(Box::new(CallbackSink::new(callback))))
        })
        .into_js_value(),
    );

    let h = handle;
    expose(
        window,
        "searchSelectedArea",
        Closure::<dyn Fn() -> String>::new(move || match h.search_selected_area() {
            Ok(json) => json,
            Err(e) => {
                log::error!("[HydroMap] area search failed: {:#}", e);
                "[]".to_string()
            }
        })
        .into_js_value(),
    );

    log::info!("[HydroMap] host interface installed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_comma_separated_layer_names() {
        assert_eq!(
            split_layer_names("USGS Streamgages, Watersheds,,  "),
            vec!["USGS Streamgages".to_string(), "Watersheds".to_string()]
        );
        assert!(split_layer_names("").is_empty());
    }
}
