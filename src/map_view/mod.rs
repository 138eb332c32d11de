//! Seam between the spin controller and whatever map library draws the globe.

pub mod mapbox;
#[cfg(test)]
pub mod recording;

pub use mapbox::MapboxView;

use crate::model::{EaseRequest, LngLat, MapEvent};

/// Camera reads and writes the spin controller needs.
pub trait MapView {
    fn zoom(&self) -> f64;
    fn center(&self) -> LngLat;
    /// Starts an eased transition. Completion is reported through `MapEvent::MoveEnd`.
    fn ease_to(&self, request: &EaseRequest);
}

pub type Handler = Box<dyn FnMut()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u32);

pub trait MapEvents {
    fn subscribe(&self, event: MapEvent, handler: Handler) -> SubscriptionId;
    /// Unknown or already removed ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}
