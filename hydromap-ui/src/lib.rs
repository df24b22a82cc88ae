//! Shared Dioxus components and Leaflet bridge for the HydroMap widget.
//!
//! This crate provides:
//! - `leaflet_bridge`: Rust wrappers for the Leaflet map script via `js_sys::eval()`
//! - `host_sink`: Host message delivery through the console or a host callback
//! - `embedded`: Inflating the gzip-compressed area GeoJSON embedded in the app
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Popup views and status RSX components

pub mod components;
pub mod embedded;
pub mod host_sink;
pub mod leaflet_bridge;
pub mod state;
