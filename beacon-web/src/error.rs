use wasm_bindgen::JsValue;

use crate::dom::js_error_message;

/// Failures raised while wiring controllers to the document.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error("storage error: {0}")]
    Storage(String),
    /// An element the initializer binds to is absent; the initializer is skipped.
    #[error("missing element: {0}")]
    MissingElement(String),
    #[error(transparent)]
    Config(#[from] beacon_core::CoreError),
}

impl WebError {
    pub fn missing(what: &str) -> Self {
        Self::MissingElement(what.to_string())
    }
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        Self::Js(js_error_message(&value))
    }
}
