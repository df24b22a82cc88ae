//! Interaction state for the HydroMap widget.
//!
//! Everything here is plain Rust with no browser dependency: the web app
//! forwards map events and host calls into a [`MapSession`], replays the
//! queued [`command::MapCommand`]s against the map, and renders the open
//! popup from [`controller::MapController::popup`].

pub mod command;
pub mod config;
pub mod controller;
pub mod event;
pub mod message;
pub mod popup;
pub mod selection;

use controller::MapController;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to the session's single controller.
#[derive(Clone)]
pub struct MapSession {
    controller: Rc<RefCell<MapController>>,
}

impl MapSession {
    pub fn new(controller: MapController) -> Self {
        Self {
            controller: Rc::new(RefCell::new(controller)),
        }
    }

    /// Run `f` with mutable access to the controller, then deliver the host
    /// messages it emitted.
    ///
    /// Delivery happens after the borrow is released, so a host callback may
    /// call back into the session.
    pub fn update<R>(&self, f: impl FnOnce(&mut MapController) -> R) -> R {
        let (out, sink, messages) = {
            let mut controller = self.controller.borrow_mut();
            let out = f(&mut controller);
            let messages = controller.take_messages();
            (out, controller.sink(), messages)
        };
        message::deliver_all(sink.as_ref(), &messages);
        out
    }

    pub fn read<R>(&self, f: impl FnOnce(&MapController) -> R) -> R {
        f(&self.controller.borrow())
    }
}

impl PartialEq for MapSession {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.controller, &other.controller)
    }
}
