//! Idle-spin camera controller.
//!
//! While nobody touches the map and the camera is zoomed out, the globe is
//! turned westward one second at a time: each step is a one-second linear ease,
//! and the move-end of that ease triggers the next step.

use crate::config::SpinConfig;
use crate::map_view::MapView;
use crate::model::{EaseRequest, Easing, LngLat, SpinPhase, SpinTrigger};

pub const STEP_DURATION_MS: u32 = 1000;

/// Degrees per second at `zoom`, or `None` when the globe should stand still.
pub fn spin_speed(config: &SpinConfig, zoom: f64) -> Option<f64> {
    if zoom >= config.max_spin_zoom {
        return None;
    }
    let mut speed = 360.0 / config.seconds_per_revolution;
    if zoom > config.slow_spin_zoom {
        let damping =
            (config.max_spin_zoom - zoom) / (config.max_spin_zoom - config.slow_spin_zoom);
        speed *= damping;
    }
    Some(speed)
}

/// The next spin step, if any. Pure in all of its inputs.
pub fn plan_step(
    config: &SpinConfig,
    interacting: bool,
    zoom: f64,
    center: LngLat,
) -> Option<EaseRequest> {
    if interacting {
        return None;
    }
    let speed = spin_speed(config, zoom)?;
    Some(EaseRequest {
        center: LngLat::new(center.lng - speed, center.lat),
        duration_ms: STEP_DURATION_MS,
        easing: Easing::Linear,
    })
}

#[derive(Debug, Clone)]
pub struct SpinController {
    config: SpinConfig,
    interacting: bool,
    ready: bool,
    phase: SpinPhase,
}

impl Default for SpinController {
    fn default() -> Self {
        Self::new(SpinConfig::default())
    }
}

impl SpinController {
    pub fn new(config: SpinConfig) -> Self {
        Self {
            config,
            interacting: false,
            ready: false,
            phase: SpinPhase::Waiting,
        }
    }

    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    /// Evaluates the idle condition and returns the step to issue, updating the phase.
    pub fn evaluate(&mut self, zoom: f64, center: LngLat) -> Option<EaseRequest> {
        let step = plan_step(&self.config, self.interacting, zoom, center);
        self.phase = match (&step, self.interacting) {
            (_, true) => SpinPhase::Interacting,
            (Some(_), false) => SpinPhase::Spinning,
            (None, false) => SpinPhase::Stopped,
        };
        if let Some(req) = &step {
            log::debug!("spin step: zoom={zoom:.2} lng {:.3} -> {:.3}", center.lng, req.center.lng);
        }
        step
    }

    /// Reads the camera from `view` and issues the step there, if any.
    pub fn evaluate_and_spin<V: MapView + ?Sized>(&mut self, view: &V) -> bool {
        match self.evaluate(view.zoom(), view.center()) {
            Some(req) => {
                view.ease_to(&req);
                true
            }
            None => false,
        }
    }

    /// Applies one event and returns the step the caller should hand to the map.
    ///
    /// Events before the first `Ready` are dropped. Later `Ready`s are ignored so a
    /// style reload cannot start a second loop next to the running one.
    pub fn handle(&mut self, trigger: SpinTrigger, zoom: f64, center: LngLat) -> Option<EaseRequest> {
        match trigger {
            SpinTrigger::Ready => {
                if self.ready {
                    return None;
                }
                self.ready = true;
                log::info!("map ready, seeding idle spin");
                self.evaluate(zoom, center)
            }
            _ if !self.ready => None,
            SpinTrigger::InteractionStart => {
                if !self.interacting {
                    log::debug!("interaction started, pausing spin");
                }
                self.interacting = true;
                self.phase = SpinPhase::Interacting;
                None
            }
            SpinTrigger::InteractionEnd => {
                self.interacting = false;
                self.evaluate(zoom, center)
            }
            SpinTrigger::AnimationEnd => self.evaluate(zoom, center),
        }
    }
}
