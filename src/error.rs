//! Error handling for the landing page

use thiserror::Error;

/// Errors that can occur while mounting or running the page
#[derive(Debug, Error)]
pub enum LandingError {
    /// No usable graphics context; the page falls back to a static background
    #[error("renderer unavailable: {0}")]
    RendererUnavailable(String),

    /// A shader failed to compile or a program failed to link
    #[error("shader error: {0}")]
    Shader(String),

    /// A required element is absent from the document
    #[error("missing element: {0}")]
    MissingElement(String),

    /// A browser API call threw
    #[error("javascript error: {0}")]
    Js(String),
}

/// Type alias for Results from landing page operations
pub type Result<T> = std::result::Result<T, LandingError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for LandingError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        LandingError::Js(format!("{value:?}"))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<LandingError> for wasm_bindgen::JsValue {
    fn from(error: LandingError) -> Self {
        wasm_bindgen::JsValue::from_str(&error.to_string())
    }
}
