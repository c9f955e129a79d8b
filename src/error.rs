//! Setup errors

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("Failed to get window")]
    NoWindow,
    #[error("Failed to get document")]
    NoDocument,
    #[error("Required element not found: {0}")]
    MissingElement(&'static str),
    #[error("2D canvas context is not supported for {0}")]
    NoContext(&'static str),
    #[error("JS exception: {0}")]
    Js(String),
}

impl From<JsValue> for SetupError {
    fn from(value: JsValue) -> Self {
        SetupError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<SetupError> for JsValue {
    fn from(err: SetupError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
