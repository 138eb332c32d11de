//! Core value types shared by the spin controller and the map views.

use serde::{Deserialize, Serialize};

/// Geographic position in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    /// Constant velocity, `t -> t`.
    Linear,
}

/// A single camera transition handed to the map view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EaseRequest {
    pub center: LngLat,
    pub duration_ms: u32,
    pub easing: Easing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpinPhase {
    /// Map style not loaded yet.
    Waiting,
    Spinning,
    /// Idle but zoomed in too far to spin.
    Stopped,
    Interacting,
}

impl SpinPhase {
    pub fn label(self) -> &'static str {
        match self {
            SpinPhase::Waiting => "Loading",
            SpinPhase::Spinning => "Spinning",
            SpinPhase::Stopped => "Zoomed in",
            SpinPhase::Interacting => "Paused",
        }
    }
}

/// What the controller makes of an incoming map event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpinTrigger {
    Ready,
    InteractionStart,
    InteractionEnd,
    AnimationEnd,
}

/// Map events the spin controller listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapEvent {
    StyleLoad,
    MouseDown,
    MouseUp,
    DragEnd,
    PitchEnd,
    RotateEnd,
    MoveEnd,
}

impl MapEvent {
    pub const ALL: [MapEvent; 7] = [
        MapEvent::StyleLoad,
        MapEvent::MouseDown,
        MapEvent::MouseUp,
        MapEvent::DragEnd,
        MapEvent::PitchEnd,
        MapEvent::RotateEnd,
        MapEvent::MoveEnd,
    ];

    /// Event name as the map library spells it.
    pub fn js_name(self) -> &'static str {
        match self {
            MapEvent::StyleLoad => "style.load",
            MapEvent::MouseDown => "mousedown",
            MapEvent::MouseUp => "mouseup",
            MapEvent::DragEnd => "dragend",
            MapEvent::PitchEnd => "pitchend",
            MapEvent::RotateEnd => "rotateend",
            MapEvent::MoveEnd => "moveend",
        }
    }

    pub fn trigger(self) -> SpinTrigger {
        match self {
            MapEvent::StyleLoad => SpinTrigger::Ready,
            MapEvent::MouseDown => SpinTrigger::InteractionStart,
            // mouseup is missed when the pointer leaves the map, the gesture ends cover that
            MapEvent::MouseUp | MapEvent::DragEnd | MapEvent::PitchEnd | MapEvent::RotateEnd => {
                SpinTrigger::InteractionEnd
            }
            MapEvent::MoveEnd => SpinTrigger::AnimationEnd,
        }
    }
}
