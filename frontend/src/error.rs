use thiserror::Error;
use wasm_bindgen::JsValue;

/// Why a page module could not attach to the document.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("required element `{0}` not found")]
    MissingElement(String),
    #[error("not supported on this device: {0}")]
    Unsupported(&'static str),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl MountError {
    pub fn missing(selector: impl Into<String>) -> Self {
        MountError::MissingElement(selector.into())
    }
}

impl From<JsValue> for MountError {
    fn from(value: JsValue) -> Self {
        MountError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid landing config: {0}")]
    Parse(#[from] serde_json::Error),
}
