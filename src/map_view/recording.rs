// In-memory map view for tests: records eases, fires events on demand
use super::{Handler, MapEvents, MapView, SubscriptionId};
use crate::model::{EaseRequest, LngLat, MapEvent};
use std::cell::{Cell, RefCell};

pub struct RecordingMap {
    zoom: Cell<f64>,
    center: Cell<LngLat>,
    eases: RefCell<Vec<EaseRequest>>,
    handlers: RefCell<Vec<(SubscriptionId, MapEvent, Handler)>>,
    next_id: Cell<u32>,
}

impl RecordingMap {
    pub fn new(zoom: f64, center: LngLat) -> Self {
        Self {
            zoom: Cell::new(zoom),
            center: Cell::new(center),
            eases: RefCell::new(Vec::new()),
            handlers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    pub fn set_zoom(&self, zoom: f64) {
        self.zoom.set(zoom);
    }

    pub fn eases(&self) -> Vec<EaseRequest> {
        self.eases.borrow().clone()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn fire(&self, event: MapEvent) {
        // handlers may subscribe while running, so run them outside the borrow
        let mut running = std::mem::take(&mut *self.handlers.borrow_mut());
        for (_, e, handler) in running.iter_mut() {
            if *e == event {
                handler();
            }
        }
        let mut handlers = self.handlers.borrow_mut();
        running.append(&mut handlers);
        *handlers = running;
    }

    /// Lands the camera on the last requested center and reports the move as finished.
    pub fn finish_ease(&self) {
        let last = self.eases.borrow().last().copied();
        if let Some(req) = last {
            self.center.set(req.center);
        }
        self.fire(MapEvent::MoveEnd);
    }
}

impl MapView for RecordingMap {
    fn zoom(&self) -> f64 {
        self.zoom.get()
    }

    fn center(&self) -> LngLat {
        self.center.get()
    }

    fn ease_to(&self, request: &EaseRequest) {
        self.eases.borrow_mut().push(*request);
    }
}

impl MapEvents for RecordingMap {
    fn subscribe(&self, event: MapEvent, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, event, handler));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.handlers.borrow_mut().retain(|(sid, _, _)| *sid != id);
    }
}
