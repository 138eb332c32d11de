use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid spin settings: {0}")]
    InvalidSpin(String),
}

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("global `{0}` is not loaded")]
    MissingGlobal(&'static str),
    #[error("element `{0}` not found")]
    MissingElement(String),
    #[error("map library error: {0}")]
    Js(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<JsValue> for ViewerError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        ViewerError::Js(msg)
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(value: serde_json::Error) -> Self {
        ViewerError::Config(ConfigError::Parse(value))
    }
}
