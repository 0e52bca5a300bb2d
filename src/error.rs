use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("canvas has no usable 2d context")]
    NoCanvasContext,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[cfg(feature = "serde_json")]
    #[error("could not parse config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
