//! Messages sent to the host application and the sinks that deliver them.
//!
//! Every message renders to a single line. Field values are written
//! verbatim; a `|` inside a site name is not escaped.

use hydromap_catalog::geometry::{BoundingBox, LatLng};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Drought index offered for a climate division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DroughtIndex {
    /// Palmer Drought Severity Index
    #[default]
    Pdsi,
    /// Standardized Precipitation Evapotranspiration Index
    Spei,
}

impl DroughtIndex {
    pub const ALL: [DroughtIndex; 2] = [DroughtIndex::Pdsi, DroughtIndex::Spei];

    pub fn code(&self) -> &'static str {
        match self {
            DroughtIndex::Pdsi => "PDSI",
            DroughtIndex::Spei => "SPEI",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        DroughtIndex::ALL.into_iter().find(|i| i.code() == code)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DroughtIndex::Pdsi => "Palmer Drought Severity Index",
            DroughtIndex::Spei => "Standardized Precipitation Evapotranspiration Index",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostMessage {
    StationSelect {
        name: String,
        external_id: String,
        dataset_type: String,
        parameter: String,
    },
    /// Reservoir adds carry the USBR region and parameter code as well.
    ReservoirSelect {
        name: String,
        external_id: String,
        parameter: String,
        region: String,
        pcode: String,
    },
    DatasetId(String),
    WatershedParam {
        huc8: String,
        dataset_id: String,
    },
    DroughtIndex {
        climdiv: String,
        index: DroughtIndex,
    },
    Coords(BoundingBox),
    Position {
        center: LatLng,
        zoom: f64,
    },
    /// Layer-control labels of the visible overlays.
    ActiveLayers(Vec<String>),
}

impl fmt::Display for HostMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostMessage::StationSelect {
                name,
                external_id,
                dataset_type,
                parameter,
            } => write!(
                f,
                "StationSelect|{}|{}|{}|{}",
                name, external_id, dataset_type, parameter
            ),
            HostMessage::ReservoirSelect {
                name,
                external_id,
                parameter,
                region,
                pcode,
            } => write!(
                f,
                "StationSelect|{}|{}|RESERVOIR|{}|{}|{}",
                name, external_id, parameter, region, pcode
            ),
            HostMessage::DatasetId(id) => write!(f, "ID:{}", id),
            HostMessage::WatershedParam { huc8, dataset_id } => {
                write!(f, "HUC:{}:PARAM:{}", huc8, dataset_id)
            }
            HostMessage::DroughtIndex { climdiv, index } => {
                write!(f, "PDSI:{}:PARAM:{}", climdiv, index.code())
            }
            HostMessage::Coords(bbox) => write!(
                f,
                "COORDS:{}|{}|{}|{}",
                bbox.north, bbox.west, bbox.south, bbox.east
            ),
            HostMessage::Position { center, zoom } => {
                write!(f, "POSITION:{}|{}|{}", center.lat, center.lng, zoom)
            }
            HostMessage::ActiveLayers(names) => write!(f, "ACTIVELAYERS:{}", names.join(",")),
        }
    }
}

/// Delivery channel to the host. Delivery is fire-and-forget.
pub trait HostSink {
    fn deliver(&self, line: &str);
}

/// Keeps every delivered line in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    lines: Rc<RefCell<Vec<String>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl HostSink for RecordingSink {
    fn deliver(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

/// Queues messages for the current sink.
///
/// Nothing is delivered while the controller is borrowed: a host callback
/// may call straight back into the widget. [`crate::MapSession::update`]
/// drains the queue once the borrow is released.
pub struct HostBridge {
    sink: Rc<dyn HostSink>,
    pending: Vec<HostMessage>,
}

impl HostBridge {
    pub fn new(sink: Box<dyn HostSink>) -> Self {
        Self {
            sink: Rc::from(sink),
            pending: Vec::new(),
        }
    }

    pub fn set_sink(&mut self, sink: Box<dyn HostSink>) {
        self.sink = Rc::from(sink);
    }

    pub fn sink(&self) -> Rc<dyn HostSink> {
        self.sink.clone()
    }

    pub fn emit(&mut self, message: HostMessage) {
        log::debug!("[HydroMap] host: {}", message);
        self.pending.push(message);
    }

    /// Messages emitted since the last call.
    pub fn take_pending(&mut self) -> Vec<HostMessage> {
        std::mem::take(&mut self.pending)
    }
}

/// Hand `messages` to `sink` in order.
pub fn deliver_all(sink: &dyn HostSink, messages: &[HostMessage]) {
    for message in messages {
        sink.deliver(&message.to_string());
    }
}
