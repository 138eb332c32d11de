//! `MapView` over the `mapboxgl` global that the host page loads.

use super::{Handler, MapEvents, MapView, SubscriptionId};
use crate::config::{ControlsConfig, FogConfig, TerrainConfig, ViewerConfig};
use crate::error::ViewerError;
use crate::model::{EaseRequest, Easing, LngLat, MapEvent};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = mapboxgl)]
    #[derive(Debug, Clone)]
    type Map;

    #[wasm_bindgen(constructor, catch, js_namespace = mapboxgl)]
    fn new(options: &JsValue) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = getZoom)]
    fn get_zoom(this: &Map) -> f64;

    #[wasm_bindgen(method, js_name = getCenter)]
    fn get_center(this: &Map) -> JsLngLat;

    #[wasm_bindgen(method, catch, js_name = easeTo)]
    fn ease_to(this: &Map, options: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn on(this: &Map, event: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method)]
    fn off(this: &Map, event: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method, catch, js_name = addControl)]
    fn add_control(this: &Map, control: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setFog)]
    fn set_fog(this: &Map, fog: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = getSource)]
    fn get_source(this: &Map, id: &str) -> JsValue;

    #[wasm_bindgen(method, catch, js_name = addSource)]
    fn add_source(this: &Map, id: &str, source: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setTerrain)]
    fn set_terrain(this: &Map, terrain: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn remove(this: &Map);

    type JsLngLat;

    #[wasm_bindgen(method, getter)]
    fn lng(this: &JsLngLat) -> f64;

    #[wasm_bindgen(method, getter)]
    fn lat(this: &JsLngLat) -> f64;

    #[wasm_bindgen(js_namespace = mapboxgl)]
    type NavigationControl;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl)]
    fn new() -> NavigationControl;

    #[wasm_bindgen(js_namespace = mapboxgl)]
    type GeolocateControl;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl)]
    fn new(options: &JsValue) -> GeolocateControl;
}

/// Serde value -> plain JS object, via JSON.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, ViewerError> {
    let raw = serde_json::to_string(value)?;
    Ok(js_sys::JSON::parse(&raw)?)
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<(), ViewerError> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value)?;
    Ok(())
}

fn mapboxgl() -> Result<JsValue, ViewerError> {
    let lib = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("mapboxgl"))?;
    if lib.is_undefined() {
        return Err(ViewerError::MissingGlobal("mapboxgl"));
    }
    Ok(lib)
}

struct Listener {
    id: SubscriptionId,
    event: MapEvent,
    callback: Closure<dyn FnMut()>,
}

pub struct MapboxView {
    map: Map,
    linear: js_sys::Function,
    listeners: RefCell<Vec<Listener>>,
    next_id: Cell<u32>,
}

impl MapboxView {
    pub fn create(container: &HtmlElement, config: &ViewerConfig) -> Result<Self, ViewerError> {
        let lib = mapboxgl()?;
        if config.access_token.is_empty() {
            log::warn!("no access token configured, relying on the page to set mapboxgl.accessToken");
        } else {
            set(&lib, "accessToken", &JsValue::from_str(&config.access_token))?;
        }

        let options = to_js(&config.map_options())?;
        set(&options, "container", container.as_ref())?;
        let map = Map::new(&options)?;
        log::info!("map created: style={} projection={}", config.style, config.projection);

        Ok(Self {
            map,
            linear: js_sys::Function::new_with_args("n", "return n"),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        })
    }

    pub fn install_controls(&self, controls: &ControlsConfig) -> Result<(), ViewerError> {
        if controls.navigation {
            self.map.add_control(NavigationControl::new().as_ref())?;
        }
        if let Some(geo) = &controls.geolocate {
            let options = to_js(&geo.options())?;
            self.map.add_control(GeolocateControl::new(&options).as_ref())?;
        }
        Ok(())
    }

    /// Makes the map reachable as `window.map`.
    pub fn expose_global(&self) -> Result<(), ViewerError> {
        let win = web_sys::window().ok_or(ViewerError::MissingGlobal("window"))?;
        set(win.as_ref(), "map", self.map.as_ref())
    }

    /// Fog and terrain belong to the style, so they are reapplied on every style load.
    pub fn apply_scene_on_style_load(
        &self,
        fog: FogConfig,
        terrain: Option<TerrainConfig>,
    ) -> SubscriptionId {
        let map = self.map.clone();
        self.subscribe(
            MapEvent::StyleLoad,
            Box::new(move || {
                if let Err(e) = apply_scene(&map, &fog, terrain.as_ref()) {
                    log::error!("failed to apply fog/terrain: {e}");
                }
            }),
        )
    }

    /// Drops every listener and tears down the map's GL context.
    pub fn remove(&self) {
        for listener in self.listeners.borrow_mut().drain(..) {
            self.map
                .off(listener.event.js_name(), listener.callback.as_ref().unchecked_ref());
        }
        self.map.remove();
    }
}

fn apply_scene(map: &Map, fog: &FogConfig, terrain: Option<&TerrainConfig>) -> Result<(), ViewerError> {
    map.set_fog(&to_js(fog)?)?;
    if let Some(terrain) = terrain {
        if map.get_source(&terrain.source_id).is_undefined() {
            map.add_source(&terrain.source_id, &to_js(&terrain.source())?)?;
        }
        map.set_terrain(&to_js(&terrain.spec())?)?;
    }
    Ok(())
}

impl MapView for MapboxView {
    fn zoom(&self) -> f64 {
        self.map.get_zoom()
    }

    fn center(&self) -> LngLat {
        let c = self.map.get_center();
        LngLat::new(c.lng(), c.lat())
    }

    fn ease_to(&self, request: &EaseRequest) {
        let options: JsValue = js_sys::Object::new().into();
        let center = js_sys::Array::of2(
            &JsValue::from_f64(request.center.lng),
            &JsValue::from_f64(request.center.lat),
        );
        let easing = match request.easing {
            Easing::Linear => &self.linear,
        };
        let built = set(&options, "center", center.as_ref())
            .and_then(|_| set(&options, "duration", &JsValue::from(request.duration_ms)))
            .and_then(|_| set(&options, "easing", easing.as_ref()));
        if let Err(e) = built {
            log::warn!("could not build ease options: {e}");
            return;
        }
        if let Err(e) = self.map.ease_to(&options) {
            log::warn!("easeTo rejected: {}", ViewerError::from(e));
        }
    }
}

impl MapEvents for MapboxView {
    fn subscribe(&self, event: MapEvent, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let callback = Closure::wrap(handler);
        self.map.on(event.js_name(), callback.as_ref().unchecked_ref());
        self.listeners.borrow_mut().push(Listener { id, event, callback });
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        let removed = {
            let mut listeners = self.listeners.borrow_mut();
            listeners
                .iter()
                .position(|l| l.id == id)
                .map(|idx| listeners.remove(idx))
        };
        if let Some(listener) = removed {
            self.map
                .off(listener.event.js_name(), listener.callback.as_ref().unchecked_ref());
        }
    }
}
