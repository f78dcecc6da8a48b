use thiserror::Error;
use wasm_bindgen::JsValue;

/// Why a widget did not attach. Neither variant is fatal: the entry point
/// logs it and moves on to the next widget.
#[derive(Debug, Error, PartialEq)]
pub enum SetupError {
    #[error("required element `{0}` not found")]
    MissingElement(&'static str),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for SetupError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        SetupError::Js(message)
    }
}
