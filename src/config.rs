//! Viewer configuration. Defaults describe the satellite globe; a JSON blob in
//! localStorage can override any subset of fields.

use crate::error::ConfigError;
use crate::model::LngLat;
use serde::{Deserialize, Serialize};

pub const STORAGE_KEY: &str = "globe_viewer_config";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    pub seconds_per_revolution: f64,
    /// Spinning stops at or above this zoom.
    pub max_spin_zoom: f64,
    /// Above this zoom the speed falls off linearly towards `max_spin_zoom`.
    pub slow_spin_zoom: f64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            seconds_per_revolution: 180.0,
            max_spin_zoom: 4.0,
            slow_spin_zoom: 2.5,
        }
    }
}

impl SpinConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.seconds_per_revolution.is_finite() && self.seconds_per_revolution > 0.0) {
            return Err(ConfigError::InvalidSpin(format!(
                "seconds_per_revolution must be positive, got {}",
                self.seconds_per_revolution
            )));
        }
        if !(self.max_spin_zoom.is_finite() && self.slow_spin_zoom.is_finite()) {
            return Err(ConfigError::InvalidSpin("zoom thresholds must be finite".into()));
        }
        if self.max_spin_zoom <= self.slow_spin_zoom {
            return Err(ConfigError::InvalidSpin(format!(
                "max_spin_zoom ({}) must exceed slow_spin_zoom ({})",
                self.max_spin_zoom, self.slow_spin_zoom
            )));
        }
        Ok(())
    }
}

/// Atmosphere settings, serialized with the map library's hyphenated keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    pub color: String,
    #[serde(rename = "high-color")]
    pub high_color: String,
    #[serde(rename = "horizon-blend")]
    pub horizon_blend: f64,
    #[serde(rename = "space-color")]
    pub space_color: String,
    #[serde(rename = "star-intensity")]
    pub star_intensity: f64,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            color: "rgb(56, 129, 168)".into(),
            high_color: "rgb(36, 92, 223)".into(),
            horizon_blend: 0.01,
            space_color: "rgb(11, 11, 25)".into(),
            star_intensity: 0.6,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub source_id: String,
    pub url: String,
    pub tile_size: u32,
    pub max_zoom: u32,
    pub exaggeration: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            source_id: "mapbox-dem".into(),
            url: "mapbox://mapbox.mapbox-terrain-dem-v1".into(),
            tile_size: 512,
            max_zoom: 14,
            exaggeration: 1.5,
        }
    }
}

/// Body of `addSource` for the elevation tiles.
#[derive(Serialize)]
pub struct DemSource<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub url: &'a str,
    #[serde(rename = "tileSize")]
    pub tile_size: u32,
    pub maxzoom: u32,
}

/// Body of `setTerrain`.
#[derive(Serialize)]
pub struct TerrainSpec<'a> {
    pub source: &'a str,
    pub exaggeration: f64,
}

impl TerrainConfig {
    pub fn source(&self) -> DemSource<'_> {
        DemSource {
            kind: "raster-dem",
            url: &self.url,
            tile_size: self.tile_size,
            maxzoom: self.max_zoom,
        }
    }

    pub fn spec(&self) -> TerrainSpec<'_> {
        TerrainSpec {
            source: &self.source_id,
            exaggeration: self.exaggeration,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocateConfig {
    pub enable_high_accuracy: bool,
    pub track_user_location: bool,
    pub show_user_heading: bool,
}

impl Default for GeolocateConfig {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            track_user_location: true,
            show_user_heading: true,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PositionOptions {
    enable_high_accuracy: bool,
}

/// Options object for `GeolocateControl`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeolocateOptions {
    position_options: PositionOptions,
    track_user_location: bool,
    show_user_heading: bool,
}

impl GeolocateConfig {
    pub fn options(&self) -> GeolocateOptions {
        GeolocateOptions {
            position_options: PositionOptions {
                enable_high_accuracy: self.enable_high_accuracy,
            },
            track_user_location: self.track_user_location,
            show_user_heading: self.show_user_heading,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub navigation: bool,
    pub geolocate: Option<GeolocateConfig>,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            navigation: true,
            geolocate: Some(GeolocateConfig::default()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub access_token: String,
    pub style: String,
    pub projection: String,
    pub zoom: f64,
    pub center: Option<LngLat>,
    /// Publish the map as `window.map` for poking at it from the console.
    pub expose_global: bool,
    pub controls: ControlsConfig,
    pub fog: FogConfig,
    pub terrain: Option<TerrainConfig>,
    pub spin: SpinConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            access_token: option_env!("MAPBOX_ACCESS_TOKEN").unwrap_or("").to_string(),
            style: "mapbox://styles/mapbox/satellite-v9".into(),
            projection: "globe".into(),
            zoom: 2.0,
            center: None,
            expose_global: true,
            controls: ControlsConfig::default(),
            fog: FogConfig::default(),
            terrain: Some(TerrainConfig::default()),
            spin: SpinConfig::default(),
        }
    }
}

/// Constructor options for the map, minus the container element.
#[derive(Serialize)]
pub struct MapOptions<'a> {
    pub style: &'a str,
    pub projection: &'a str,
    pub zoom: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,
}

impl ViewerConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: ViewerConfig = serde_json::from_str(raw)?;
        cfg.spin.validate()?;
        Ok(cfg)
    }

    pub fn map_options(&self) -> MapOptions<'_> {
        MapOptions {
            style: &self.style,
            projection: &self.projection,
            zoom: self.zoom,
            center: self.center.map(LngLat::to_array),
        }
    }

    /// Defaults overlaid with whatever is stored under [`STORAGE_KEY`].
    pub fn load() -> Self {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(raw)) = store.get_item(STORAGE_KEY) {
                    match Self::from_json(&raw) {
                        Ok(cfg) => return cfg,
                        Err(e) => log::warn!("ignoring stored viewer config: {e}"),
                    }
                }
            }
        }
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_satellite_globe() {
        let cfg = ViewerConfig::default();
        assert_eq!(cfg.style, "mapbox://styles/mapbox/satellite-v9");
        assert_eq!(cfg.projection, "globe");
        assert_eq!(cfg.zoom, 2.0);
        assert_eq!(cfg.spin, SpinConfig { seconds_per_revolution: 180.0, max_spin_zoom: 4.0, slow_spin_zoom: 2.5 });
        assert!(cfg.spin.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg = ViewerConfig::from_json(r#"{"zoom": 1.5, "spin": {"max_spin_zoom": 5}}"#).unwrap();
        assert_eq!(cfg.zoom, 1.5);
        assert_eq!(cfg.spin.max_spin_zoom, 5.0);
        assert_eq!(cfg.spin.slow_spin_zoom, 2.5);
        assert_eq!(cfg.spin.seconds_per_revolution, 180.0);
        assert_eq!(cfg.fog, FogConfig::default());
    }

    #[test]
    fn terrain_can_be_disabled() {
        let cfg = ViewerConfig::from_json(r#"{"terrain": null}"#).unwrap();
        assert!(cfg.terrain.is_none());
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let err = ViewerConfig::from_json(r#"{"spin": {"max_spin_zoom": 2, "slow_spin_zoom": 3}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSpin(_)));
    }

    #[test]
    fn rejects_non_positive_revolution_time() {
        let spin = SpinConfig { seconds_per_revolution: 0.0, ..SpinConfig::default() };
        assert!(spin.validate().is_err());
        let spin = SpinConfig { seconds_per_revolution: f64::NAN, ..SpinConfig::default() };
        assert!(spin.validate().is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(ViewerConfig::from_json("{zoom"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn fog_uses_library_keys() {
        let v = serde_json::to_value(FogConfig::default()).unwrap();
        assert_eq!(v["high-color"], "rgb(36, 92, 223)");
        assert_eq!(v["horizon-blend"], 0.01);
        assert_eq!(v["space-color"], "rgb(11, 11, 25)");
        assert_eq!(v["star-intensity"], 0.6);
        assert_eq!(v["color"], "rgb(56, 129, 168)");
    }

    #[test]
    fn terrain_splits_into_source_and_spec() {
        let t = TerrainConfig::default();
        let source = serde_json::to_value(t.source()).unwrap();
        assert_eq!(
            source,
            serde_json::json!({
                "type": "raster-dem",
                "url": "mapbox://mapbox.mapbox-terrain-dem-v1",
                "tileSize": 512,
                "maxzoom": 14
            })
        );
        let spec = serde_json::to_value(t.spec()).unwrap();
        assert_eq!(spec, serde_json::json!({ "source": "mapbox-dem", "exaggeration": 1.5 }));
    }

    #[test]
    fn geolocate_options_are_camel_case() {
        let v = serde_json::to_value(GeolocateConfig::default().options()).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "positionOptions": { "enableHighAccuracy": true },
                "trackUserLocation": true,
                "showUserHeading": true
            })
        );
    }

    #[test]
    fn map_options_omit_missing_center() {
        let v = serde_json::to_value(ViewerConfig::default().map_options()).unwrap();
        assert!(v.get("center").is_none());
        let cfg = ViewerConfig { center: Some(LngLat::new(10.0, 20.0)), ..ViewerConfig::default() };
        let v = serde_json::to_value(cfg.map_options()).unwrap();
        assert_eq!(v["center"], serde_json::json!([10.0, 20.0]));
    }
}
