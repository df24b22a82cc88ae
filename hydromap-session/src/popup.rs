//! Popup content and the selections made inside an open popup.

use crate::config::AddMessageStyle;
use crate::message::{DroughtIndex, HostMessage};
use hydromap_catalog::dataset::{Dataset, DatasetType, ParameterSeries};
use hydromap_catalog::geometry::LatLng;
use hydromap_catalog::watershed::{CatalogItem, WatershedEntry};

/// Popup for a dataset marker.
///
/// One selected index drives the displayed period of record and the id and
/// parameter sent by "Add", so they always describe the same series.
#[derive(Debug, Clone, PartialEq)]
pub struct SitePopup {
    pub dataset: Dataset,
    selected: usize,
}

impl SitePopup {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            selected: 0,
        }
    }

    pub fn choices(&self) -> &[ParameterSeries] {
        &self.dataset.parameters
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&ParameterSeries> {
        self.dataset.parameters.get(self.selected)
    }

    /// Returns false and keeps the current choice when `index` is out of range.
    pub fn select_parameter(&mut self, index: usize) -> bool {
        if index < self.dataset.parameters.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    pub fn por_label(&self) -> String {
        self.selected().map(|s| s.por_label()).unwrap_or_default()
    }

    pub fn add_message(&self, style: AddMessageStyle) -> HostMessage {
        let (internal_id, parameter) = self
            .selected()
            .map(|s| (s.internal_id.clone(), s.parameter.clone()))
            .unwrap_or_default();
        let d = &self.dataset;
        match style {
            AddMessageStyle::InternalId => HostMessage::DatasetId(internal_id),
            AddMessageStyle::Station if d.dataset_type == DatasetType::Reservoir => {
                HostMessage::ReservoirSelect {
                    name: d.name.clone(),
                    external_id: d.external_id.clone(),
                    parameter,
                    region: d.region.clone(),
                    pcode: d.pcode.clone(),
                }
            }
            AddMessageStyle::Station => HostMessage::StationSelect {
                name: d.name.clone(),
                external_id: d.external_id.clone(),
                dataset_type: d.dataset_type.tag().to_string(),
                parameter,
            },
        }
    }
}

/// Popup for a watershed: a checklist over the watershed's catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct WatershedPopup {
    pub name: String,
    pub entry: WatershedEntry,
    checked: Vec<bool>,
}

impl WatershedPopup {
    pub fn new(name: &str, entry: WatershedEntry) -> Self {
        let checked = vec![false; entry.len()];
        Self {
            name: name.to_string(),
            entry,
            checked,
        }
    }

    pub fn huc8(&self) -> &str {
        &self.entry.huc8
    }

    pub fn items(&self) -> &[CatalogItem] {
        self.entry.items()
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    pub fn toggle(&mut self, index: usize) -> bool {
        match self.checked.get_mut(index) {
            Some(c) => {
                *c = !*c;
                true
            }
            None => false,
        }
    }

    /// The "select all" master: checks or unchecks every item at once.
    pub fn set_all(&mut self, checked: bool) {
        self.checked.iter_mut().for_each(|c| *c = checked);
    }

    pub fn all_checked(&self) -> bool {
        !self.checked.is_empty() && self.checked.iter().all(|&c| c)
    }

    pub fn checked_items(&self) -> Vec<&CatalogItem> {
        self.items()
            .iter()
            .zip(&self.checked)
            .filter(|&(_, &c)| c)
            .map(|(item, _)| item)
            .collect()
    }

    /// One message per checked item, in list order. Gridded items are
    /// requested by watershed; catalog datasets by their internal id.
    pub fn add_messages(&self) -> Vec<HostMessage> {
        self.checked_items()
            .into_iter()
            .map(|item| {
                if item.is_gridded() {
                    HostMessage::WatershedParam {
                        huc8: self.huc8().to_string(),
                        dataset_id: item.id.clone(),
                    }
                } else {
                    HostMessage::DatasetId(item.id.clone())
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClimateDivisionPopup {
    pub code: String,
    pub name: String,
    pub index: DroughtIndex,
}

impl ClimateDivisionPopup {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            index: DroughtIndex::default(),
        }
    }

    pub fn add_message(&self) -> HostMessage {
        HostMessage::DroughtIndex {
            climdiv: self.code.clone(),
            index: self.index,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Popup {
    Site(SitePopup),
    Watershed(WatershedPopup),
    ClimateDivision(ClimateDivisionPopup),
}

/// The popup currently shown and where it is anchored.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenPopup {
    pub anchor: LatLng,
    pub popup: Popup,
}
