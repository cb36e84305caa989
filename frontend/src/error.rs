use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys;

#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("browser call failed: {0}")]
    Js(String),

    #[error("no window or document available")]
    NoDocument,

    #[error("invalid site config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid site config: {key} must be {expected}, got {value}")]
    OutOfRange {
        key: &'static str,
        expected: &'static str,
        value: f64,
    },

    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

impl From<JsValue> for EnhanceError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|err| String::from(err.message()))
            })
            .unwrap_or_else(|| format!("{:?}", value));
        EnhanceError::Js(message)
    }
}
