//! HydroMap dataset selection map
//!
//! A Leaflet map embedded in the forecasting desktop application. The host
//! pushes the dataset catalog in, the user browses stations, watersheds and
//! climate divisions, and selections go back to the host as one-line
//! messages.
//!
//! Data flow:
//! 1. `build.rs` gzips the watershed and climate-division GeoJSON into `OUT_DIR`.
//! 2. `include_bytes!` embeds them; they are inflated and drawn on mount and
//!    the watershed names are indexed in the in-memory SQLite database.
//! 3. The host calls `loadDatasetCatalog(...)`, which builds the station
//!    layers and indexes the catalog for area searches.
//! 4. Map events arrive as JSON through `window.__hydromapEvent` and are
//!    handled by the session coroutine; host calls go through [`exports`].

mod exports;

use dioxus::prelude::*;
use futures_util::StreamExt;
use hydromap_catalog::feature::FeatureCollection;
use hydromap_catalog::watershed::{load_areas, AreaFeature, AreaKind};
use hydromap_db::Database;
use hydromap_session::config::MapConfig;
use hydromap_session::controller::MapController;
use hydromap_session::event::MapEvent;
use hydromap_session::MapSession;
use hydromap_ui::components::{ErrorDisplay, LoadingSpinner, ModeBanner, PopupPanel};
use hydromap_ui::host_sink::ConsoleSink;
use hydromap_ui::state::AppState;
use hydromap_ui::{embedded, leaflet_bridge};

/// HUC8 watershed polygons.
const WATERSHEDS_GZ: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/huc8.geojson.gz"));
/// Climate division polygons.
const CLIMATE_DIVISIONS_GZ: &[u8] =
    include_bytes!(concat!(env!("OUT_DIR"), "/climate_divisions.geojson.gz"));

/// Map container DOM element ID used by Leaflet.
const MAP_CONTAINER_ID: &str = "hydromap-map";

/// Work for the session coroutine.
pub enum SessionMsg {
    /// Raw JSON event from the map script.
    Event(String),
    /// A host call changed the session; re-render from it.
    Refresh,
}

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("hydromap-root"))
        .launch(App);
}

fn load_embedded_areas() -> anyhow::Result<(Vec<AreaFeature>, Vec<AreaFeature>)> {
    let watersheds = FeatureCollection::parse(&embedded::inflate(WATERSHEDS_GZ)?)?;
    let divisions = FeatureCollection::parse(&embedded::inflate(CLIMATE_DIVISIONS_GZ)?)?;
    Ok((
        load_areas(&watersheds, AreaKind::Watershed),
        load_areas(&divisions, AreaKind::ClimateDivision),
    ))
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let session = use_context_provider(|| {
        MapSession::new(MapController::new(
            MapConfig::default(),
            Box::new(ConsoleSink),
        ))
    });

    // Map events and host-call refreshes are handled in arrival order
    let worker_session = session.clone();
    let worker = use_coroutine(move |mut rx: UnboundedReceiver<SessionMsg>| {
        let session = worker_session.clone();
        async move {
            while let Some(msg) = rx.next().await {
                if let SessionMsg::Event(json) = msg {
                    match MapEvent::from_json(&json) {
                        Ok(event) => session.update(|c| c.handle_event(event)),
                        Err(e) => log::warn!("[HydroMap] {:#}", e),
                    }
                }
                state.sync(&session);
            }
        }
    });

    // Initialize map, area layers and the host interface on mount
    let init_session = session.clone();
    use_effect(move || {
        leaflet_bridge::init_map(MAP_CONTAINER_ID);

        let db = match Database::new() {
            Ok(db) => db,
            Err(e) => {
                state
                    .error_msg
                    .set(Some(format!("Database initialization failed: {}", e)));
                state.loading.set(false);
                return;
            }
        };

        match load_embedded_areas() {
            Ok((watersheds, divisions)) => {
                if let Err(e) = db.load_watersheds(&watersheds) {
                    log::error!("Failed to index watersheds: {}", e);
                }
                init_session.update(|c| c.load_areas(watersheds, divisions));
            }
            Err(e) => {
                log::error!("Failed to load area layers: {}", e);
                state
                    .error_msg
                    .set(Some(format!("Failed to load area layers: {}", e)));
            }
        }

        let tx = worker.tx();
        exports::install(
            init_session.clone(),
            move |msg| {
                let _ = tx.unbounded_send(msg);
            },
            db,
        );
        state.loading.set(false);
        state.sync(&init_session);
    });

    rsx! {
        div {
            style: "position: relative; width: 100%; height: 100vh; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            div {
                id: MAP_CONTAINER_ID,
                style: "position: absolute; inset: 0;",
            }

            ModeBanner {}
            PopupPanel {}

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay { message: err }
            } else if (state.loading)() {
                LoadingSpinner { label: "Loading map layers...".to_string() }
            } else if !(state.catalog_loaded)() {
                LoadingSpinner { label: "Waiting for dataset catalog...".to_string() }
            }
        }
    }
}
