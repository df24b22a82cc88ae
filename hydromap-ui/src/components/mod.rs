//! Dioxus RSX components for the HydroMap widget.

mod climate_division_popup;
mod error_display;
mod loading_spinner;
mod mode_banner;
mod popup_panel;
mod site_popup;
mod watershed_popup;

pub use climate_division_popup::ClimateDivisionPopupView;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use mode_banner::ModeBanner;
pub use popup_panel::PopupPanel;
pub use site_popup::SitePopupView;
pub use watershed_popup::WatershedPopupView;
