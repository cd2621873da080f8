//! Platform abstraction layer
//!
//! The core never touches the DOM. On wasm32, `web` binds it to the page:
//! element lookup, event listeners, animation frames and timers.

#[cfg(target_arch = "wasm32")]
pub mod web;

use thiserror::Error;

/// Element ids the page must provide
pub mod ids {
    pub const CARD: &str = "valentine-card";
    pub const QUESTION: &str = "question";
    pub const ACTIONS: &str = "actions";
    pub const YES_BUTTON: &str = "yes-button";
    pub const NO_BUTTON: &str = "no-button";
    pub const SUCCESS: &str = "success";

    /// Every required id, in lookup order
    pub const REQUIRED: [&str; 6] = [CARD, QUESTION, ACTIONS, YES_BUTTON, NO_BUTTON, SUCCESS];
}

/// Card attribute holding optional `Tuning` JSON
pub const TUNING_ATTRIBUTE: &str = "data-tuning";

/// Fatal page setup failures
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("required element #{0} not found")]
    MissingElement(&'static str),
    #[error("element #{0} is not an HTML element")]
    WrongElementType(&'static str),
    #[error("browser call failed: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SetupError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        SetupError::Js(format!("{:?}", value))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<SetupError> for wasm_bindgen::JsValue {
    fn from(err: SetupError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
