//! Watershed multi-select and bounding-box drawing state.

use hydromap_catalog::geometry::BoundingBox;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Browsing,
    Selecting,
}

/// Result of clicking a watershed while selecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    /// Not selecting; the click is handled as a normal popup click.
    Ignored,
}

/// HUC8 codes picked in `Selecting` mode, in click order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionSelection {
    mode: SelectionMode,
    selected: Vec<String>,
}

impl RegionSelection {
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_selecting(&self) -> bool {
        self.mode == SelectionMode::Selecting
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Enter `Selecting` with an empty set. Re-entering starts over.
    pub fn begin(&mut self) {
        self.mode = SelectionMode::Selecting;
        self.selected.clear();
    }

    pub fn toggle(&mut self, huc8: &str) -> Toggle {
        if !self.is_selecting() {
            return Toggle::Ignored;
        }
        match self.selected.iter().position(|h| h == huc8) {
            Some(pos) => {
                self.selected.remove(pos);
                Toggle::Removed
            }
            None => {
                self.selected.push(huc8.to_string());
                Toggle::Added
            }
        }
    }

    /// Leave `Selecting` and hand back the set. Empty when already browsing.
    pub fn finish(&mut self) -> Vec<String> {
        if !self.is_selecting() {
            return Vec::new();
        }
        self.mode = SelectionMode::Browsing;
        std::mem::take(&mut self.selected)
    }
}

/// An in-progress rectangle drawn with the region-shade overlay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxSelection {
    active: bool,
    bounds: Option<BoundingBox>,
}

impl BoxSelection {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn begin(&mut self) {
        self.active = true;
        self.bounds = None;
    }

    /// Latest bounds reported by the overlay. Ignored unless drawing.
    pub fn update(&mut self, bounds: BoundingBox) -> bool {
        if self.active {
            self.bounds = Some(bounds);
        }
        self.active
    }

    /// Stop drawing and return the last reported bounds, if any.
    pub fn finish(&mut self) -> Option<BoundingBox> {
        if !self.active {
            return None;
        }
        self.active = false;
        self.bounds.take()
    }
}
