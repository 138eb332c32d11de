//! Puts the pieces together: map, controls, atmosphere and the idle spin.

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::map_view::{MapEvents, MapboxView, SubscriptionId};
use crate::model::SpinPhase;
use crate::state::{SpinBinding, SpinController};
use std::rc::Rc;
use web_sys::HtmlElement;

/// A live globe. Dropping it unhooks the spin and removes the map.
pub struct MountedGlobe {
    view: Rc<MapboxView>,
    binding: SpinBinding<MapboxView>,
    scene: SubscriptionId,
}

pub fn mount(
    container: &HtmlElement,
    config: &ViewerConfig,
    on_phase: impl Fn(SpinPhase) + 'static,
) -> Result<MountedGlobe, ViewerError> {
    config.spin.validate()?;
    let view = Rc::new(MapboxView::create(container, config)?);
    if let Err(e) = view.install_controls(&config.controls) {
        view.remove();
        return Err(e);
    }
    if config.expose_global {
        if let Err(e) = view.expose_global() {
            log::warn!("could not expose map on window: {e}");
        }
    }
    // registered first so the terrain is in place before the first spin step
    let scene = view.apply_scene_on_style_load(config.fog.clone(), config.terrain.clone());
    let binding = SpinBinding::attach(view.clone(), SpinController::new(config.spin), on_phase);
    Ok(MountedGlobe {
        view,
        binding,
        scene,
    })
}

impl Drop for MountedGlobe {
    fn drop(&mut self) {
        self.binding.detach();
        self.view.unsubscribe(self.scene);
        self.view.remove();
        log::info!("globe unmounted");
    }
}
